use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};

/// 최종 프롬프트 문서를 이루는 아홉 개의 고정 섹션.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionId {
    Role,
    Goal,
    Environment,
    Inputs,
    Outputs,
    Constraints,
    Exceptions,
    Validation,
    Examples,
}

impl SectionId {
    pub const ALL: [SectionId; 9] = [
        SectionId::Role,
        SectionId::Goal,
        SectionId::Environment,
        SectionId::Inputs,
        SectionId::Outputs,
        SectionId::Constraints,
        SectionId::Exceptions,
        SectionId::Validation,
        SectionId::Examples,
    ];

    fn index(self) -> usize {
        self as usize
    }

    pub fn key(self) -> &'static str {
        match self {
            SectionId::Role => "role",
            SectionId::Goal => "goal",
            SectionId::Environment => "environment",
            SectionId::Inputs => "inputs",
            SectionId::Outputs => "outputs",
            SectionId::Constraints => "constraints",
            SectionId::Exceptions => "exceptions",
            SectionId::Validation => "validation",
            SectionId::Examples => "examples",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            SectionId::Role => "역할 정의",
            SectionId::Goal => "목표/산출물",
            SectionId::Environment => "환경·버전",
            SectionId::Inputs => "입력 스펙",
            SectionId::Outputs => "출력 포맷",
            SectionId::Constraints => "제약/정책",
            SectionId::Exceptions => "예외 처리",
            SectionId::Validation => "검증/테스트",
            SectionId::Examples => "예시",
        }
    }

    fn default_text(self) -> &'static str {
        match self {
            SectionId::Role => {
                "당신은 시니어 오토메이션 엔지니어입니다. 사용자의 목표를 빠르게 파악하고 구조화된 프롬프트를 작성하세요."
            }
            SectionId::Goal => {
                "최종 산출물은 실행 가능한 프롬프트 또는 n8n 워크플로우 JSON 스켈레톤입니다."
            }
            SectionId::Environment => "(예) n8n 1.100.1 / Google Workspace 연동 / Vision API 사용",
            SectionId::Inputs => {
                "(예) 스캔 이미지(JPG) → OCR → 파싱 스키마: 날짜, 품목, LotNo, 수량…"
            }
            SectionId::Outputs => "(예) JSON 코드블록 + 주석, 또는 n8n 워크플로우 JSON 구조",
            SectionId::Constraints => "명확성, 재현성, 보안(비밀키 노출 금지), 성능(타임아웃 대비)",
            SectionId::Exceptions => "인증 실패, 빈 데이터, 중복/중첩 행, 시트 권한 오류 시의 분기",
            SectionId::Validation => "샘플 3건으로 시뮬레이션, 결과 스키마 검증, 실패시 재시도 규칙",
            SectionId::Examples => "입력 예시와 기대 출력 예시를 제공",
        }
    }
}

/// 섹션 본문. 배열로 보관하므로 키는 항상 정확히 아홉 개다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sections([String; 9]);

/// 스냅샷 로그에서는 `key()`를 키로 하는 맵으로 보인다.
impl Serialize for Sections {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(SectionId::ALL.len()))?;
        for (id, text) in self.iter() {
            map.serialize_entry(id.key(), text)?;
        }
        map.end()
    }
}

impl Default for Sections {
    fn default() -> Self {
        Self(SectionId::ALL.map(|id| id.default_text().to_string()))
    }
}

impl Sections {
    pub fn get(&self, id: SectionId) -> &str {
        &self.0[id.index()]
    }

    pub fn set(&mut self, id: SectionId, text: String) {
        self.0[id.index()] = text;
    }

    /// 아직 기본 안내 문구 그대로인지 여부.
    pub fn is_seeded(&self, id: SectionId) -> bool {
        self.get(id) == id.default_text()
    }

    pub fn iter(&self) -> impl Iterator<Item = (SectionId, &str)> {
        SectionId::ALL.into_iter().map(|id| (id, self.get(id)))
    }
}
