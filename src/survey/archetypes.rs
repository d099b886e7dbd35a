//! Static descriptive records for the 16 profile cells.
//!
//! The classifier is total, so every profile should hit the table; the
//! placeholder record exists for the unmapped-combination path anyway.

use super::{AttachmentType, EfficacyLevel, Profile, RegulationStyle};

/// Display record for one profile cell.
#[derive(Debug, Clone, Copy)]
pub struct Archetype {
    pub symbol: &'static str,
    pub name: &'static str,
    pub headline: &'static str,
    pub description: &'static str,
}

/// Placeholder for combinations with no table entry.
pub const PLACEHOLDER: Archetype = Archetype {
    symbol: "🐾",
    name: "임시 유형",
    headline: "유형 설명 준비 중",
    description: "이 유형 설명은 준비 중입니다.",
};

struct Entry {
    attachment: AttachmentType,
    regulation: RegulationStyle,
    efficacy: EfficacyLevel,
    archetype: Archetype,
}

use AttachmentType::{Anxious, Avoidant, Dismissive, Secure};
use EfficacyLevel::{High, Low};
use RegulationStyle::{Expressive, Suppressive};

static TABLE: [Entry; 16] = [
    Entry {
        attachment: Secure,
        regulation: Expressive,
        efficacy: High,
        archetype: Archetype {
            symbol: "🦦",
            name: "따뜻한 수달",
            headline: "안정형 · 표현형 · 효능감 높음",
            description: "이 유형은 자신과 타인을 모두 긍정적으로 보며, 감정을 자연스럽게 표현하는 편이에요. \
                자신의 능력에 대한 확신도 있어 관계와 목표 모두에서 안정적인 기반을 가지고 움직입니다.\n\n\
                갈등이 발생해도 과도하게 흔들리기보다 맥락을 설명하며 차분히 조율하려는 태도가 강해요.\n\n\
                어려움이 와도 회피하기보다 해결을 향해 접근하고, \"할 수 있다\"는 믿음으로 조용히 지속해 나갑니다.\n\n\
                모든 상황을 혼자 정리하려 하기보다, 필요할 땐 도움을 받아들이면 더 여유로운 관계를 만들 수 있어요.",
        },
    },
    Entry {
        attachment: Secure,
        regulation: Expressive,
        efficacy: Low,
        archetype: Archetype {
            symbol: "🐑",
            name: "잔잔한 양",
            headline: "안정형 · 표현형 · 효능감 낮음",
            description: "감정을 자연스럽게 드러내며 관계를 소중히 여기지만, 새로운 상황 앞에서는 자신감이 흔들릴 수 있어요.\n\n\
                관계에서는 따뜻하고 일관된 분위기를 유지하지만, 도전 앞에서는 \"내가 해낼 수 있을까\"가 먼저 떠오를 때가 있어요.\n\n\
                작은 성공 경험을 촘촘히 쌓고 스스로를 격려하는 습관이 생기면 행동 폭이 크게 넓어질 수 있습니다.",
        },
    },
    Entry {
        attachment: Secure,
        regulation: Suppressive,
        efficacy: High,
        archetype: Archetype {
            symbol: "🐻",
            name: "숲을 지키는 곰",
            headline: "안정형 · 억제형 · 효능감 높음",
            description: "감정 표현은 절제하지만 자기·타인에 대한 긍정이 탄탄하고, 문제를 침착하게 해결하는 능력이 돋보입니다.\n\n\
                다만 감정 공유가 적어 오해가 생길 수 있어요. 감정을 조금만 더 나누면 관계의 깊이가 훨씬 풍부해집니다.",
        },
    },
    Entry {
        attachment: Secure,
        regulation: Suppressive,
        efficacy: Low,
        archetype: Archetype {
            symbol: "🦊",
            name: "바람을 지켜보는 사막여우",
            headline: "안정형 · 억제형 · 효능감 낮음",
            description: "타인에 대한 신뢰는 있으나 자기 확신은 조심스러운 편이에요. 감정을 억제하며 혼자 해결하려는 경향이 있습니다.\n\n\
                점진적인 성공 경험을 쌓으면 자신감이 크게 상승하는 유형입니다.",
        },
    },
    Entry {
        attachment: Anxious,
        regulation: Expressive,
        efficacy: High,
        archetype: Archetype {
            symbol: "🐹",
            name: "민감한 귀염둥이 햄스터",
            headline: "불안형 · 표현형 · 효능감 높음",
            description: "감정 반응은 빠르지만 '불안을 행동으로 전환'하는 힘이 있어 추진력이 강합니다.\n\n\
                민감성을 단점이 아닌 '연결의 능력'으로 쓰는 방향이 도움이 됩니다.",
        },
    },
    Entry {
        attachment: Anxious,
        regulation: Expressive,
        efficacy: Low,
        archetype: Archetype {
            symbol: "🐦",
            name: "감정 많은 참새",
            headline: "불안형 · 표현형 · 효능감 낮음",
            description: "감정 폭이 넓고 변화가 빠르며 인정 욕구가 강하지만 자기 확신이 약해 쉽게 흔들릴 수 있어요.\n\n\
                감정을 깊이 느끼고 진심으로 관계를 대한다는 강점이 있으니, 스스로를 격려하는 연습이 관계 안정에 도움이 됩니다.",
        },
    },
    Entry {
        attachment: Anxious,
        regulation: Suppressive,
        efficacy: High,
        archetype: Archetype {
            symbol: "🦌",
            name: "고요한 사슴",
            headline: "불안형 · 억제형 · 효능감 높음",
            description: "불안을 예민하게 느끼지만 드러내지 않고 스스로 해결하려 합니다. 효능감이 높아 문제를 다루지만, 표현 억제로 거리감이 생길 수 있어요.\n\n\
                안전한 방식의 감정 표현 연습이 큰 도움이 됩니다.",
        },
    },
    Entry {
        attachment: Anxious,
        regulation: Suppressive,
        efficacy: Low,
        archetype: Archetype {
            symbol: "🐱",
            name: "숨어 있는 고양이",
            headline: "불안형 · 억제형 · 효능감 낮음",
            description: "불안은 크지만 표현은 조용해 내부 스트레스가 오래 쌓일 수 있어요.\n\n\
                감정을 안전하게 나누는 경험 + 작은 성취 반복이 매우 중요합니다.",
        },
    },
    Entry {
        attachment: Avoidant,
        regulation: Expressive,
        efficacy: High,
        archetype: Archetype {
            symbol: "🐺",
            name: "떠돌이 늑대",
            headline: "회피형 · 표현형 · 효능감 높음",
            description: "표현은 자연스럽지만 깊은 관계엔 조심스러울 수 있어요. 혼자 해결 능력은 강합니다.\n\n\
                관계를 끊기보다 '경계를 조절하는 기술'을 익히면 균형이 좋아집니다.",
        },
    },
    Entry {
        attachment: Avoidant,
        regulation: Expressive,
        efficacy: Low,
        archetype: Archetype {
            symbol: "🐨",
            name: "하품하는 코알라",
            headline: "회피형 · 표현형 · 효능감 낮음",
            description: "관계가 깊어질 때 불안과 회피가 동시에 올라올 수 있어요.\n\n\
                안정적인 성공경험과 지지 경험을 천천히 쌓는 것이 변화의 핵심입니다.",
        },
    },
    Entry {
        attachment: Avoidant,
        regulation: Suppressive,
        efficacy: High,
        archetype: Archetype {
            symbol: "🐆",
            name: "독립적인 표범",
            headline: "회피형 · 억제형 · 효능감 높음",
            description: "표현은 절제하고 관계는 조심스럽게 유지하지만, 혼자 해결에 강합니다.\n\n\
                감정을 드러내는 것이 약점이라는 신념을 내려놓는 순간 관계의 질이 달라집니다.",
        },
    },
    Entry {
        attachment: Avoidant,
        regulation: Suppressive,
        efficacy: Low,
        archetype: Archetype {
            symbol: "🐢",
            name: "바위 틈의 거북",
            headline: "회피형 · 억제형 · 효능감 낮음",
            description: "자기 확신이 낮고 타인을 쉽게 신뢰하지 않아 관계와 도전 모두에 조심스럽습니다.\n\n\
                작게 구조화된 목표부터 성공경험을 쌓는 접근이 잘 맞습니다.",
        },
    },
    Entry {
        attachment: Dismissive,
        regulation: Expressive,
        efficacy: High,
        archetype: Archetype {
            symbol: "🦅",
            name: "대담한 매",
            headline: "거부형 · 표현형 · 효능감 높음",
            description: "자기 믿음은 강하지만 타인 신뢰는 낮아 관계는 가볍게 유지될 수 있어요.\n\n\
                깊은 정서 교류가 부담스러울 때, '가능한 범위'부터 합의하는 방식이 유효합니다.",
        },
    },
    Entry {
        attachment: Dismissive,
        regulation: Expressive,
        efficacy: Low,
        archetype: Archetype {
            symbol: "🐦‍⬛",
            name: "새벽 까마귀",
            headline: "거부형 · 표현형 · 효능감 낮음",
            description: "표현은 하지만 타인 신뢰가 낮아 일정 선을 유지하려는 경향이 있습니다.\n\n\
                작은 성공경험을 쌓아 '할 수 있다' 감각을 회복하는 게 중요합니다.",
        },
    },
    Entry {
        attachment: Dismissive,
        regulation: Suppressive,
        efficacy: High,
        archetype: Archetype {
            symbol: "🐈‍⬛",
            name: "고독한 전략가 흑호",
            headline: "거부형 · 억제형 · 효능감 높음",
            description: "감정 표현은 거의 없고 자기 지탱 힘이 강합니다.\n\n\
                표현을 조금만 허용하면 연결이 부드러워지고 피로감이 줄 수 있어요.",
        },
    },
    Entry {
        attachment: Dismissive,
        regulation: Suppressive,
        efficacy: Low,
        archetype: Archetype {
            symbol: "🦉",
            name: "고목 위 부엉이",
            headline: "거부형 · 억제형 · 효능감 낮음",
            description: "자기·타인 긍정 모두 낮아 관계를 매우 신중하게 대합니다.\n\n\
                작은 성공 경험 + 신뢰할 수 있는 한 사람의 확보가 회복에 큰 도움이 됩니다.",
        },
    },
];

/// Look up the display record for a profile.
pub fn archetype_for(profile: &Profile) -> &'static Archetype {
    TABLE
        .iter()
        .find(|e| {
            e.attachment == profile.attachment
                && e.regulation == profile.regulation
                && e.efficacy == profile.efficacy
        })
        .map(|e| &e.archetype)
        .unwrap_or(&PLACEHOLDER)
}
