use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Deserialize, Serialize)]
pub(crate) struct Part {
    #[serde(default)]
    pub(crate) text: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub(crate) struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) role: Option<String>,
    #[serde(default)]
    pub(crate) parts: Vec<Part>,
}

impl Content {
    fn text(role: Option<&str>, text: &str) -> Self {
        Content {
            role: role.map(ToOwned::to_owned),
            parts: vec![Part {
                text: Some(text.to_owned()),
            }],
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub(crate) struct GenerateContentRequest {
    pub(crate) contents: Vec<Content>,

    #[serde(rename = "systemInstruction")]
    pub(crate) system_instruction: Content,
}

impl GenerateContentRequest {
    pub(crate) fn new(instruction: &str, text: &str) -> Self {
        GenerateContentRequest {
            contents: vec![Content::text(Some("user"), text)],
            system_instruction: Content::text(None, instruction),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub(crate) struct Candidate {
    #[serde(default)]
    pub(crate) content: Content,
}

#[derive(Clone, Debug, Deserialize)]
pub(crate) struct GenerateContentResponse {
    #[serde(default)]
    pub(crate) candidates: Vec<Candidate>,
}

impl GenerateContentResponse {
    /// Text parts of the first candidate, joined.
    pub(crate) fn into_text(self) -> Option<String> {
        let text = self
            .candidates
            .into_iter()
            .next()?
            .content
            .parts
            .into_iter()
            .filter_map(|part| part.text)
            .collect::<String>();

        let text = text.trim();
        (!text.is_empty()).then(|| text.to_owned())
    }
}
