//! Interactive survey runner.

use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

use crate::survey::questions::QUESTIONS;
use crate::survey::scoring::{AnswerSet, SurveyResult, evaluate, score_to_percent};
use crate::survey::archetype_for;

/// Prompt all 19 items, score them, and print the profile.
pub fn run() -> anyhow::Result<SurveyResult> {
    let mut editor = DefaultEditor::new()?;
    let mut answers = AnswerSet::new();

    println!("관계 성향 설문 ({}문항, 1=전혀 아니다 … 7=매우 그렇다)\n", QUESTIONS.len());

    for (idx, question) in QUESTIONS.iter().enumerate() {
        let value = ask_item(&mut editor, idx + 1, question.text)?;
        answers.insert(question.key, value);
    }

    let result = evaluate(&answers);
    print_result(&result);
    Ok(result)
}

fn ask_item(editor: &mut DefaultEditor, number: usize, text: &str) -> anyhow::Result<u8> {
    loop {
        let line = match editor.readline(&format!("{number:2}. {text}\n    [1-7] > ")) {
            Ok(line) => line,
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => {
                anyhow::bail!("설문이 중단되었습니다")
            }
            Err(e) => return Err(e.into()),
        };
        match line.trim().parse::<u8>() {
            Ok(v @ 1..=7) => return Ok(v),
            _ => println!("    1에서 7 사이의 숫자를 입력해 주세요."),
        }
    }
}

fn print_result(result: &SurveyResult) {
    let archetype = archetype_for(&result.profile);

    println!("\n────────────────────────────────");
    println!("{} {}", archetype.symbol, archetype.name);
    println!("{}", archetype.headline);
    println!("\n{}", archetype.description);
    println!("\n프로필: {}", result.profile);
    println!("\n  자기 신뢰      {:3}%", ratio_percent(result.scores.self_model));
    println!("  타인 신뢰      {:3}%", ratio_percent(result.scores.other_model));
    println!("  감정 표현      {:3}%", score_to_percent(result.scores.expression));
    println!("  자기 효능감    {:3}%", score_to_percent(result.scores.efficacy));
    println!("────────────────────────────────");
}

fn ratio_percent(ratio: f64) -> u8 {
    (ratio * 100.0).round().clamp(0.0, 100.0) as u8
}
