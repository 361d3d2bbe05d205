use indexmap::IndexMap;
use vdir_core::schema::SourceMapping;

/// Table aliases introduced while rewriting one filter.
///
/// The primary source is always referred to by its own name. Every other
/// reference gets a fresh `name2`, `name3`, ... alias that collides neither
/// with a source mapping name nor with an alias handed out earlier.
#[derive(Debug, Clone, Default)]
pub struct Aliases {
    /// Names that can never be used as a fresh alias
    reserved: Vec<String>,

    /// alias -> source mapping name, in order of introduction
    aliases: IndexMap<String, String>,
}

impl Aliases {
    pub fn new<'a>(sources: impl IntoIterator<Item = &'a SourceMapping>) -> Aliases {
        Aliases {
            reserved: sources.into_iter().map(|source| source.name.clone()).collect(),
            aliases: IndexMap::new(),
        }
    }

    /// The next unused alias for `source`. Nothing is recorded until the
    /// alias is [`register`]ed.
    ///
    /// [`register`]: Aliases::register
    pub fn next(&self, source: &str) -> String {
        (2..)
            .map(|counter| format!("{source}{counter}"))
            .find(|alias| !self.is_taken(alias))
            .unwrap_or_else(|| source.to_string())
    }

    /// Records that `alias` refers to `source`.
    pub fn register(&mut self, alias: impl Into<String>, source: impl Into<String>) {
        self.aliases.insert(alias.into(), source.into());
    }

    pub fn get(&self, alias: &str) -> Option<&str> {
        self.aliases.get(alias).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.aliases
            .iter()
            .map(|(alias, source)| (alias.as_str(), source.as_str()))
    }

    pub fn len(&self) -> usize {
        self.aliases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }

    fn is_taken(&self, alias: &str) -> bool {
        self.reserved.iter().any(|name| name == alias) || self.aliases.contains_key(alias)
    }
}
