//! Counseling REPL.
//!
//! Runs the survey, resolves the session persona, then loops on user input.
//! Slash commands: `/summary` shows the rolling summary, `/reset` restarts
//! the conversation, `/quit` prints the closing summary and exits.

use std::sync::Arc;

use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tracing::error;

use crate::agent::{ClosingSummarizer, SessionState, TurnOrchestrator};
use crate::bootstrap;
use crate::config::Config;
use crate::context::ContextAssembler;
use crate::cli::survey;

pub async fn run(config: &Config, nickname: Option<&str>) -> anyhow::Result<()> {
    let services = bootstrap::init(config)?;

    let result = survey::run()?;
    let persona = services
        .persona_table
        .resolve(&result.profile, nickname)
        .clone();
    println!("\n상담 페르소나: {}\n", persona.nickname);

    let assembler = ContextAssembler::new(
        services.counsel_store.clone(),
        services.risk_store.clone(),
    );
    let orchestrator = TurnOrchestrator::new(services.llm.clone(), assembler, persona);
    let closer = ClosingSummarizer::new(Arc::clone(&services.llm));

    let mut session = SessionState::new();
    let mut editor = DefaultEditor::new()?;

    println!("고민을 이야기해 주세요. (/summary, /reset, /quit)\n");

    loop {
        let line = match editor.readline("나 > ") {
            Ok(line) => line,
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
            Err(e) => return Err(e.into()),
        };
        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        editor.add_history_entry(input)?;

        match input {
            "/quit" => break,
            "/reset" => {
                session.reset();
                println!("대화를 초기화했습니다.\n");
                continue;
            }
            "/summary" => {
                println!("\n[대화 요약]\n{}\n", session.summary());
                continue;
            }
            _ => {}
        }

        match orchestrator.process(&mut session, input).await {
            Ok(outcome) => println!("\n상담자 > {}\n", outcome.reply),
            Err(e) => {
                error!(error = %e, "turn failed");
                println!("\n(답변 생성에 실패했습니다. 다시 시도해 주세요.)\n");
            }
        }
    }

    if !session.turns().is_empty() {
        match closer.summarize(session.summary(), session.ever_risk()).await {
            Ok(summary) => println!("\n[상담 종료 요약]\n{summary}"),
            Err(e) => error!(error = %e, "closing summary failed"),
        }
    }

    Ok(())
}
