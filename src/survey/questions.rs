//! The fixed 19-item question set.
//!
//! Defined once at compile time. Keys are stable identifiers used by answer
//! sets; prompt order here is canonical but scoring never depends on it.

/// Which composite a question feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scale {
    SelfPositive,
    SelfNegative,
    OtherPositive,
    OtherNegative,
    /// Suppression items reverse-coded into an expression score.
    Expression,
    /// Cognitive reappraisal. Collected for counseling context; not used by
    /// the classifier.
    Reappraisal,
    Efficacy,
}

/// One questionnaire item.
#[derive(Debug, Clone, Copy)]
pub struct Question {
    pub key: &'static str,
    pub text: &'static str,
    pub scale: Scale,
    /// Reverse-coded items score as `8 - value`.
    pub reverse: bool,
}

/// The full instrument: 5 self-model, 5 other-model, 6 emotion-regulation,
/// 6 efficacy items (3+2 / 3+2 / 3+3 / 6).
pub const QUESTIONS: [Question; 22] = [
    // Self model: positive
    Question {
        key: "s1",
        text: "실수해도 '내가 무가치해진 건 아니다'라고 비교적 빨리 정리하는 편이다.",
        scale: Scale::SelfPositive,
        reverse: false,
    },
    Question {
        key: "s2",
        text: "중요한 결정을 앞두면, 결국은 내가 감당할 수 있다는 쪽에 더 무게가 실린다.",
        scale: Scale::SelfPositive,
        reverse: false,
    },
    Question {
        key: "s3",
        text: "비판을 들어도, 내 전체를 부정당한 느낌보단 '부분 피드백'으로 받아들이려 한다.",
        scale: Scale::SelfPositive,
        reverse: false,
    },
    // Self model: negative (reverse-coded)
    Question {
        key: "s4",
        text: "상대 반응이 차가우면 '내가 문제라서'라는 해석이 먼저 떠오르는 편이다.",
        scale: Scale::SelfNegative,
        reverse: true,
    },
    Question {
        key: "s5",
        text: "사랑받으려면 '지금의 나'로는 부족하다는 생각이 종종 든다.",
        scale: Scale::SelfNegative,
        reverse: true,
    },
    // Other model: positive
    Question {
        key: "o1",
        text: "도움을 요청하면, 대체로 사람들은 나를 해치기보다 도우려 했던 경험이 더 많다.",
        scale: Scale::OtherPositive,
        reverse: false,
    },
    Question {
        key: "o2",
        text: "관계가 깊어질수록 '연결이 생긴다'는 기대가 비교적 자연스럽다.",
        scale: Scale::OtherPositive,
        reverse: false,
    },
    Question {
        key: "o3",
        text: "내가 솔직히 말해도, 상대가 전부 공격으로 받진 않을 거라고 생각하는 편이다.",
        scale: Scale::OtherPositive,
        reverse: false,
    },
    // Other model: negative (reverse-coded)
    Question {
        key: "o4",
        text: "가까워질수록 '언젠가 상처받을 것 같다'는 경계가 먼저 올라오는 편이다.",
        scale: Scale::OtherNegative,
        reverse: true,
    },
    Question {
        key: "o5",
        text: "호의를 받아도 '속에 다른 의도가 있을 수 있다'는 의심이 스치는 편이다.",
        scale: Scale::OtherNegative,
        reverse: true,
    },
    // Emotion regulation: suppression items, reverse-coded into expression
    Question {
        key: "e1",
        text: "감정이 커져도 '티 안 나게' 정리하려는 편이다.",
        scale: Scale::Expression,
        reverse: true,
    },
    Question {
        key: "e2",
        text: "좋아도 싫어도 표정/말투가 크게 드러나지 않게 조절하는 편이다.",
        scale: Scale::Expression,
        reverse: true,
    },
    Question {
        key: "e3",
        text: "갈등이 생기면 감정을 말하기보다 일단 눌러두고 넘어가려 한다.",
        scale: Scale::Expression,
        reverse: true,
    },
    // Emotion regulation: reappraisal
    Question {
        key: "e4",
        text: "기분이 가라앉으면, 일부러 의미/좋은 점을 찾아 해석을 바꿔보는 편이다.",
        scale: Scale::Reappraisal,
        reverse: false,
    },
    Question {
        key: "e5",
        text: "상대 말에 상처받아도 '그럴 수도 있지'로 마음을 정리하려 한다.",
        scale: Scale::Reappraisal,
        reverse: false,
    },
    Question {
        key: "e6",
        text: "스트레스가 오면, 상황을 더 차분한 관점으로 다시 보는 편이다.",
        scale: Scale::Reappraisal,
        reverse: false,
    },
    // Self-efficacy
    Question {
        key: "g1",
        text: "불안해도 '일단 해보자'로 시작하는 편이다.",
        scale: Scale::Efficacy,
        reverse: false,
    },
    Question {
        key: "g2",
        text: "막히면 포기보다 '다른 방법'을 찾아보는 쪽이 더 빠르다.",
        scale: Scale::Efficacy,
        reverse: false,
    },
    Question {
        key: "g3",
        text: "실패해도 '내 능력 전체'로 일반화하기보다 다음 시도를 준비하는 편이다.",
        scale: Scale::Efficacy,
        reverse: false,
    },
    Question {
        key: "g4",
        text: "조언을 들으면 '비판'보다 '업그레이드 기회'로 받아들이려 한다.",
        scale: Scale::Efficacy,
        reverse: false,
    },
    Question {
        key: "g5",
        text: "부담이 커도 도망치기보다 '작게 쪼개서' 처리하려 한다.",
        scale: Scale::Efficacy,
        reverse: false,
    },
    Question {
        key: "g6",
        text: "긴장해도 해야 할 일의 핵심만 잡고 계속 진행할 수 있는 편이다.",
        scale: Scale::Efficacy,
        reverse: false,
    },
];
