//! Askama file shells. Per-member bodies are synthesized as line blocks
//! by the protocol functions; these templates only lay out the file
//! around them (imports, namespace, closing braces), which keeps the
//! anchors the custom-region merge relies on in fixed positions.

use askama::Template;

/// C# file shell: using directives, namespace, pre-indented body lines.
#[derive(Template)]
#[template(path = "cs_file.txt", escape = "none")]
pub struct CsFileTemplate {
    pub usings: Vec<String>,
    pub namespace: String,
    pub body: Vec<String>,
}

/// TypeScript file shell: import lines plus body lines.
#[derive(Template)]
#[template(path = "ts_file.txt", escape = "none")]
pub struct TsFileTemplate {
    pub imports: Vec<String>,
    pub body: Vec<String>,
}

/// One display row of a server-rendered view partial.
pub struct ViewField {
    pub label: String,
    pub member: String,
}

/// Razor view partial for one entity.
#[derive(Template)]
#[template(path = "view.cshtml.txt", escape = "none")]
pub struct ViewTemplate {
    pub model_type: String,
    pub fields: Vec<ViewField>,
}

/// Dependency-registration artifact for a layer.
#[derive(Template)]
#[template(path = "registration.cs.txt", escape = "none")]
pub struct RegistrationTemplate {
    pub usings: Vec<String>,
    pub namespace: String,
    pub class_name: String,
    pub method: String,
    pub registrations: Vec<String>,
}

/// Render a template into the line sequence a [`crate::item::GeneratedItem`]
/// accumulates.
pub fn render_lines<T: Template>(template: &T) -> anyhow::Result<Vec<String>> {
    Ok(template.render()?.lines().map(String::from).collect())
}
