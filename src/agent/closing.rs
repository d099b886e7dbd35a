//! Few-shot closing summary produced when a session ends.

use std::sync::Arc;

use crate::error::LlmError;
use crate::llm::LlmProvider;

/// Line labels of the closing summary, in output order.
pub const SUMMARY_LABELS: [&str; 5] = [
    "[감정]",
    "[핵심 고민]",
    "[오늘 정리된 방향]",
    "[다음 한 걸음]",
    "[안전/경계]",
];

const FORMAT_BASE: &str = "\
[감정] ...
[핵심 고민] ...
[오늘 정리된 방향] ...
[다음 한 걸음] ...";

const FORMAT_WITH_SAFETY: &str = "\
[감정] ...
[핵심 고민] ...
[오늘 정리된 방향] ...
[다음 한 걸음] ...
[안전/경계] ...";

struct FewShot {
    history_summary: &'static str,
    risk_mode: bool,
    output: &'static str,
}

static FEW_SHOTS: [FewShot; 2] = [
    FewShot {
        history_summary: "연인이 바쁠 때 연락이 줄어 불안해짐. 추궁하면 갈등이 커질까 걱정함. \
                          상대는 여유가 부족한 상황일 가능성이 큼.",
        risk_mode: false,
        output: "\
[감정] 서운함과 불안이 함께 올라오셨습니다.
[핵심 고민] 연락 빈도를 애정으로 해석하게 되면서 마음이 흔들리는 점이 핵심입니다.
[오늘 정리된 방향] 추궁 대신 ‘필요한 연결 방식’을 구체적으로 합의하는 쪽이 안전합니다.
[다음 한 걸음] 오늘은 추가 메시지를 멈추고, 내일 10분 통화 루틴을 제안해 보세요.",
    },
    FewShot {
        history_summary: "상대가 위치 추적을 원하거나 감시/통제를 요구하는 맥락이 있었고, \
                          사용자가 불안을 크게 느낌. 안전과 경계가 우선 필요함.",
        risk_mode: true,
        output: "\
[감정] 불안과 압박감이 크게 느껴지셨습니다.
[핵심 고민] 관계에서 ‘통제/감시’가 안전감을 해치고 있습니다.
[오늘 정리된 방향] 상대의 요구를 즉시 수용하기보다 경계를 명확히 세우는 것이 우선입니다.
[다음 한 걸음] 위치/비밀번호 공유는 중단하고, ‘이건 불편해서 못 한다’는 한 문장만 전달하세요.
[안전/경계] 위협·협박이 느껴지면 주변 도움(지인/기관)으로 안전을 먼저 확보하세요.",
    },
];

/// Force every labeled line onto its own line and drop blank lines. Models
/// occasionally glue labels together or pad with empties; the rendered
/// summary must be one labeled line per row.
pub fn enforce_linebreaks(text: &str) -> String {
    let mut t = text.trim().to_string();
    for label in SUMMARY_LABELS {
        t = t.replace(label, &format!("\n{label}"));
    }
    t.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

fn closing_prompt(history_summary: &str, risk_mode: bool) -> String {
    let shots = FEW_SHOTS
        .iter()
        .map(|ex| {
            format!(
                "### 예시 입력\n[대화 요약]\n{}\n[risk_mode]\n{}\n\n\
                 ### 예시 출력(정답 형식)\n{}",
                ex.history_summary, ex.risk_mode, ex.output
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n");

    let format_block = if risk_mode {
        FORMAT_WITH_SAFETY
    } else {
        FORMAT_BASE
    };

    format!(
        "당신은 연애/관계 상담 대화를 ‘상담 종료 요약’으로 정리하는 도우미입니다.\n\
         반드시 사용자가 읽기 쉬운 한국어 존댓말로만 작성하세요.\n\
         절대 목록(불릿/번호)을 쓰지 말고, 아래 지정 양식 그대로 줄바꿈을 유지하세요.\n\
         출력은 오직 요약 본문만 반환하세요(설명/서문/코드 금지).\n\n\
         [지정 양식]\n{format_block}\n\n\
         [few-shot 예시]\n{shots}\n\n\
         [실제 입력]\n[대화 요약]\n{history_summary}\n[risk_mode]\n{risk_mode}\n\n\
         [작성 규칙]\n\
         - 총 3~5줄(위험모드면 4~5줄)\n\
         - 각 줄은 양식의 라벨로 시작\n\
         - 조언은 ‘다음 한 걸음’에만 1줄로\n\
         - risk_mode=true면 [안전/경계] 줄을 반드시 포함"
    )
}

/// Produces the labeled closing summary from the final rolling summary.
pub struct ClosingSummarizer {
    llm: Arc<dyn LlmProvider>,
}

impl ClosingSummarizer {
    pub fn new(llm: Arc<dyn LlmProvider>) -> Self {
        Self { llm }
    }

    /// Generate the closing summary. `ever_risk` selects the five-label
    /// format, which requires the safety/boundary line.
    pub async fn summarize(
        &self,
        history_summary: &str,
        ever_risk: bool,
    ) -> Result<String, LlmError> {
        let prompt = closing_prompt(history_summary, ever_risk);
        let text = self.llm.complete_checked(&prompt).await?;
        Ok(enforce_linebreaks(&text))
    }
}
