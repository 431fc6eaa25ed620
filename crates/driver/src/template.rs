/// Role of one message in a prompt template
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    System,
    User,
}

/// One line of a prompt template
#[derive(Debug, Clone)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }
}

/// A prompt template folded from a message list.
///
/// System lines accumulate into the system preamble, everything else into
/// the user prompt, each joined with a trailing newline. `{name}`
/// placeholders are substituted at render time.
#[derive(Debug, Clone, Default)]
pub struct Template {
    system: String,
    prompt: String,
}

impl Template {
    pub fn new(messages: &[Message]) -> Self {
        let mut template = Self::default();
        for message in messages {
            let target = match message.role {
                Role::System => &mut template.system,
                Role::User => &mut template.prompt,
            };
            target.push_str(&message.content);
            target.push('\n');
        }
        template
    }

    /// System preamble with `{name}` placeholders substituted
    #[must_use]
    pub fn render_system(&self, vars: &[(&str, &str)]) -> String {
        substitute(&self.system, vars)
    }

    /// User prompt with `{name}` placeholders substituted
    #[must_use]
    pub fn render_prompt(&self, vars: &[(&str, &str)]) -> String {
        substitute(&self.prompt, vars)
    }

    /// Whether any system lines were supplied
    #[must_use]
    pub fn has_system(&self) -> bool {
        !self.system.is_empty()
    }
}

fn substitute(text: &str, vars: &[(&str, &str)]) -> String {
    let mut out = text.to_string();
    for (name, value) in vars {
        out = out.replace(&format!("{{{name}}}"), value);
    }
    out
}
