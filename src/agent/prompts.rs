//! Prompt construction for the dialogue pipeline.
//!
//! The turn prompt stacks: the fixed policy/identity block, the resolved
//! persona's operating directives, the assembled retrieval context, the
//! risk block when present, the rolling summary, and the new message.

use crate::persona::PersonaRule;
use crate::safety::RiskPack;

/// Badge prefixed to every risk-flagged reply.
pub const RISK_BADGE: &str = "🚨 위험신호 발견";

/// Fixed policy/identity block, the top of every turn prompt.
pub const SYSTEM_POLICY: &str = "\
[챗봇 정체성]
본 챗봇은 연애 및 관계에 대한 고민을 함께 정리하는 AI 상담 파트너이며,
전문 상담사·의료·법률 전문가가 아닙니다.
모든 조언은 참고용 관점 제시에 해당합니다.

[상담 원칙 / 윤리 기준]
1. 관계 갈등을 옳고 그름의 문제로 판단하지 않고, 욕구·기대·상황의 충돌로 해석합니다.
2. 감정은 평가하지 않고 이해의 대상으로 다루며, 감정보다 감정을 다루는 방식에 주목합니다.
3. 과도한 희생이나 집착을 관계의 건강 신호로 해석하지 않습니다.
4. 자율성을 관계의 위협이 아닌 핵심 요소로 존중합니다.
5. 제한된 정보로 상대의 의도·성격·관계를 단정하지 않습니다.
6. 공감하되, 감정에서 비롯된 모든 행동을 정당화하지 않습니다.
7. 빠른 결론보다 사고의 확장과 맥락 이해를 우선합니다.
8. 의료적·법적 조언이나 진단을 하지 않으며, 사용자의 선택을 대신 결정하거나 강요하지 않습니다.
9. 윤리적·관계적 위험이 있는 요청은 수행하지 않으며, 대화를 더 안전한 방향으로 전환합니다.
10. 공감은 사실 기반으로 유지하고, 한쪽에 치우치지 않는 중립적 균형을 지킵니다.
11. 실명·연락처·위치 등 민감한 정보를 요구하거나 활용하지 않습니다.

[안전 대응 원칙]
- 자해·자살·폭력·즉각적 안전 위협 신호가 감지될 경우, 공감과 안전 확보를 최우선으로 안내합니다.
- 불법·감시·통제·조작을 돕는 구체적 방법은 제공하지 않습니다.";

/// The persona's operating directives, rendered from the resolved rule.
pub fn counselor_state(rule: &PersonaRule) -> String {
    let forbidden = if rule.forbidden_phrases.is_empty() {
        "상대/사용자 비난, 강요, 단정".to_string()
    } else {
        rule.forbidden_phrases.join(", ")
    };
    let tone = non_blank(&rule.tone, "동등·존중형");
    let goal = non_blank(&rule.goal, "사용자 부담 완화 + 현실적 조율");
    let core_traits = non_blank(&rule.core_traits, "감정 안정/균형 유지");

    format!(
        "[상담자 운영 상태 / counselor_state]\n\
         - 페르소나(별명): {}\n\
         - 권장 톤: {}\n\
         - 상담자 목표: {}\n\
         - 핵심 특성(주의점): {}\n\
         - 금지 화법(절대 사용 금지): {}",
        rule.nickname, tone, goal, core_traits, forbidden
    )
}

fn non_blank<'a>(value: &'a str, default: &'a str) -> &'a str {
    if value.trim().is_empty() { default } else { value }
}

/// The Risk pack as a labeled prompt block.
pub fn risk_block(pack: &RiskPack) -> String {
    let steps = pack
        .required_steps
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "[위험 대응 가이드 / risk_pack]\n\
         - 선택된 Level: {}\n\
         - 필수 Step: {}\n\
         - Level 문서:\n{}\n\n\
         - Step 문서:\n{}",
        pack.level, steps, pack.level_guidance, pack.step_guidance
    )
}

/// Full prompt for one dialogue turn.
pub fn turn_prompt(
    rule: &PersonaRule,
    counsel_context: &str,
    risk: Option<&RiskPack>,
    history_summary: &str,
    user_message: &str,
) -> String {
    let risk_mode = risk.is_some();
    let risk_section = risk.map(risk_block).unwrap_or_default();

    format!(
        "{policy}\n\n\
         {state}\n\n\
         [참고 컨텍스트 / counsel_context]\n{context}\n\n\
         {risk_section}\n\n\
         [대화 요약 / history_summary]\n{summary}\n\n\
         [최신 사용자 발화 / user_message]\n{message}\n\n\
         [지시]\n\
         - 금지 화법은 절대 사용하지 마세요.\n\
         - risk_mode={risk_mode}인 경우, Step 흐름을 답변 구조에 반영하세요.\n\
         - 다음 한 걸음(질문 1~2개 또는 행동 1~2개)을 포함하세요.\n\
         - 답변은 3~4줄 이내로 작성하세요. 목록형 설명 금지.\n\
         - 항상 존댓말 사용하세요.",
        policy = SYSTEM_POLICY,
        state = counselor_state(rule),
        context = counsel_context,
        risk_section = risk_section,
        summary = history_summary,
        message = user_message,
        risk_mode = risk_mode,
    )
    .trim()
    .to_string()
}

/// Prompt replacing the rolling summary after a completed turn.
pub fn summary_update_prompt(prev_summary: &str, user_message: &str, assistant_reply: &str) -> String {
    format!(
        "아래 정보를 바탕으로 '대화 요약'을 3~5줄 한국어로 갱신하세요.\n\n\
         [이전 요약]\n{prev_summary}\n\n\
         [사용자 발화]\n{user_message}\n\n\
         [상담자 답변]\n{assistant_reply}\n\n\
         [출력]\n\
         - 3~5줄 요약(줄바꿈 포함)"
    )
}
