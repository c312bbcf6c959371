//! Prompt catalog.
//!
//! Fixed instruction texts keyed by (artifact kind, target language). The
//! templates describe the JSON shape the provider must answer with; they do
//! not enforce it. Enforcement, if any, happens when the reply is parsed.

use dg_core::{ArtifactKind, TargetLanguage};

const DECISION_PROMPT: &str = r#"Tell me if the code is a function or a React component.

Answer with a single word, exactly one of:
Function
Component
None

Use None when the code is neither a function nor a component, or when you cannot tell."#;

const FUNCTION_EN: &str = r#"Generate documentation for a function containing:
  - name: the name of the function
  - params: every parameter with its description
  - description: a description of the whole function
  - usage: how to use the function API

Answer ONLY with a valid JSON object, no text outside it, shaped like:

{"name":"functionName","params":{"param1":"description1","param2":"description2"},"description":"the whole function description","usage":"how to use the function API"}"#;

const FUNCTION_RO: &str = r#"Generează documentația pentru o funcție, care să conțină:
  - name: numele funcției
  - params: fiecare parametru împreună cu descrierea lui
  - description: descrierea întregii funcții
  - usage: modul de utilizare al API-ului funcției

Păstrează cheile JSON în engleză și scrie valorile în limba română.
Răspunde DOAR cu un obiect JSON valid, fără text în afara lui, de forma:

{"name":"numeleFuncției","params":{"param1":"descriere1","param2":"descriere2"},"description":"descrierea întregii funcții","usage":"cum se folosește API-ul funcției"}"#;

const COMPONENT_EN: &str = r#"Generate documentation for a React component containing:
  - name: the name of the component
  - props: every prop with its description
  - description: a description of the whole component
  - usage: how to use the component API

Answer ONLY with a valid JSON object, no text outside it, shaped like:

{"name":"ComponentName","props":{"prop1":"description1","prop2":"description2"},"description":"the whole component description","usage":"how to use the component API"}"#;

const COMPONENT_RO: &str = r#"Generează documentația pentru o componentă React, care să conțină:
  - name: numele componentei
  - props: fiecare proprietate (prop) împreună cu descrierea ei
  - description: descrierea întregii componente
  - usage: modul de utilizare al API-ului componentei

Păstrează cheile JSON în engleză și scrie valorile în limba română.
Răspunde DOAR cu un obiect JSON valid, fără text în afara lui, de forma:

{"name":"NumeleComponentei","props":{"prop1":"descriere1","prop2":"descriere2"},"description":"descrierea întregii componente","usage":"cum se folosește API-ul componentei"}"#;

/// Static prompt catalog.
pub struct PromptCatalog;

impl PromptCatalog {
    /// Instruction used by the classifier.
    pub fn decision_prompt() -> &'static str {
        DECISION_PROMPT
    }

    /// Template for documenting `kind` in `language`.
    ///
    /// `ArtifactKind::None` has no template.
    pub fn lookup(kind: ArtifactKind, language: TargetLanguage) -> Option<&'static str> {
        match (kind, language) {
            (ArtifactKind::Function, TargetLanguage::En) => Some(FUNCTION_EN),
            (ArtifactKind::Function, TargetLanguage::Ro) => Some(FUNCTION_RO),
            (ArtifactKind::Component, TargetLanguage::En) => Some(COMPONENT_EN),
            (ArtifactKind::Component, TargetLanguage::Ro) => Some(COMPONENT_RO),
            (ArtifactKind::None, _) => None,
        }
    }

    /// Keys a well-formed documentation object carries for `kind`.
    ///
    /// `name` is optional and therefore not listed.
    pub fn required_keys(kind: ArtifactKind) -> &'static [&'static str] {
        match kind {
            ArtifactKind::Function => &["params", "description", "usage"],
            ArtifactKind::Component => &["props", "description", "usage"],
            ArtifactKind::None => &[],
        }
    }
}

/// Strip a markdown code fence wrapped around a reply.
///
/// Providers often answer with ```` ```json ... ``` ```` even when told not
/// to. Anything that is not a single fenced block is returned trimmed but
/// otherwise unchanged.
pub fn strip_code_fence(reply: &str) -> &str {
    let trimmed = reply.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let Some(body) = rest.strip_suffix("```") else {
        return trimmed;
    };

    // Drop the info string (e.g. "json") on the opening line
    match body.find('\n') {
        Some(newline) => body[newline + 1..].trim(),
        None => strip_info_word(body.trim()),
    }
}

/// Drop a leading info word from a single-line fenced body.
fn strip_info_word(body: &str) -> &str {
    match body.split_once(char::is_whitespace) {
        Some((info, rest)) if is_info_word(info) => rest.trim(),
        _ => body,
    }
}

fn is_info_word(word: &str) -> bool {
    !word.is_empty()
        && word.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        && !matches!(word, "true" | "false" | "null")
        && !word.starts_with(|c: char| c.is_ascii_digit() || c == '-')
}
