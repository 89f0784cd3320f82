use crate::error::{Error, Result};

pub const DEBUG: &str = "Debug";
pub const SKIP_GLOBALS: &str = "SkipGlobals";
pub const TIMINGS: &str = "Timings";
pub const PUBLISH: &str = "Publish";

/// A named boolean flag consuming `arity` positional tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toggle {
    name: &'static str,
    aliases: &'static [&'static str],
    arity: usize,
    enabled: bool,
}

impl Toggle {
    pub const fn new(name: &'static str, aliases: &'static [&'static str]) -> Self {
        Self {
            name,
            aliases,
            arity: 1,
            enabled: false,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn arity(&self) -> usize {
        self.arity
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    fn matches(&self, token: &str) -> bool {
        let wanted = normalize_name(token);
        normalize_name(self.name) == wanted
            || self.aliases.iter().any(|alias| normalize_name(alias) == wanted)
    }

    fn handle_params(&mut self, params: &[String]) -> Result<()> {
        self.enabled = parse_bool(self.name, &params[0])?;
        Ok(())
    }
}

fn normalize_name(name: &str) -> String {
    name.chars()
        .filter(|ch| *ch != '-' && *ch != '_')
        .flat_map(char::to_lowercase)
        .collect()
}

pub fn parse_bool(name: &str, value: &str) -> Result<bool> {
    match value.to_lowercase().as_str() {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(Error::InvalidToggle {
            name: name.to_string(),
            value: value.to_string(),
        }),
    }
}

/// The set of toggles this build understands, in registration order.
#[derive(Debug, Clone)]
pub struct ArgumentRegistry {
    toggles: Vec<Toggle>,
}

impl Default for ArgumentRegistry {
    fn default() -> Self {
        Self::new(vec![
            Toggle::new(DEBUG, &["debug-mode"]),
            Toggle::new(SKIP_GLOBALS, &[]),
            Toggle::new(TIMINGS, &["emit-timings"]),
            Toggle::new(PUBLISH, &["publish-mode"]),
        ])
    }
}

impl ArgumentRegistry {
    pub fn new(toggles: Vec<Toggle>) -> Self {
        Self { toggles }
    }

    /// Consume `tokens` as `NAME VALUE` pairs.
    pub fn parse<S: AsRef<str>>(mut self, tokens: &[S]) -> Result<ArgumentList> {
        let tokens: Vec<String> = tokens.iter().map(|t| t.as_ref().to_string()).collect();
        let mut index = 0;
        while index < tokens.len() {
            let token = &tokens[index];
            let toggle = self
                .toggles
                .iter_mut()
                .find(|toggle| toggle.matches(token))
                .ok_or_else(|| Error::UnknownArgument(token.clone()))?;

            let start = index + 1;
            let end = start + toggle.arity();
            if end > tokens.len() {
                return Err(Error::MissingArgumentValue {
                    name: toggle.name().to_string(),
                    expected: toggle.arity(),
                    found: tokens.len() - start,
                });
            }
            toggle.handle_params(&tokens[start..end])?;
            index = end;
        }

        Ok(ArgumentList {
            toggles: self.toggles,
        })
    }
}

/// Parsed toggles. Immutable once produced.
#[derive(Debug, Clone)]
pub struct ArgumentList {
    toggles: Vec<Toggle>,
}

impl ArgumentList {
    pub fn parse<S: AsRef<str>>(tokens: &[S]) -> Result<Self> {
        ArgumentRegistry::default().parse(tokens)
    }

    /// Panics if `name` was never registered.
    pub fn enabled(&self, name: &str) -> bool {
        self.toggles
            .iter()
            .find(|toggle| toggle.matches(name))
            .unwrap_or_else(|| panic!("argument '{name}' is not registered"))
            .enabled()
    }

    pub fn debug(&self) -> bool {
        self.enabled(DEBUG)
    }

    pub fn skip_globals(&self) -> bool {
        self.enabled(SKIP_GLOBALS)
    }

    pub fn timings(&self) -> bool {
        self.enabled(TIMINGS)
    }

    pub fn publish(&self) -> bool {
        self.enabled(PUBLISH)
    }

    pub fn toggles(&self) -> impl Iterator<Item = &Toggle> {
        self.toggles.iter()
    }
}
