use std::collections::HashMap;

/// Tag names the rule language can refer to.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum TagName {
    Album,
    Artist,
    Date,
    Year,
    Genre,
    Comment,
}

impl TagName {
    /// Parse a lower-case tag name. `comments` is accepted for `comment`.
    pub fn parse(name: &str) -> Option<Self> {
        let tag = match name {
            "album" => TagName::Album,
            "artist" => TagName::Artist,
            "date" => TagName::Date,
            "year" => TagName::Year,
            "genre" => TagName::Genre,
            "comment" | "comments" => TagName::Comment,
            _ => return None,
        };
        Some(tag)
    }

    /// Canonical key, as stored in a [`TagMap`].
    pub fn as_str(self) -> &'static str {
        match self {
            TagName::Album => "album",
            TagName::Artist => "artist",
            TagName::Date => "date",
            TagName::Year => "year",
            TagName::Genre => "genre",
            TagName::Comment => "comment",
        }
    }

    pub fn is_date_like(self) -> bool {
        matches!(self, TagName::Date | TagName::Year)
    }
}

/// One file's tags, keyed by lower-cased tag name.
///
/// `year` and `date` mirror each other when only one of them was present
/// in the source. This is settled once, in [`TagMap::build`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagMap {
    entries: HashMap<String, String>,
}

impl TagMap {
    pub fn build<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut entries: HashMap<String, String> = pairs
            .into_iter()
            .map(|(k, v)| (k.to_lowercase(), v))
            .collect();

        match (entries.get("year").cloned(), entries.get("date").cloned()) {
            (Some(year), None) => {
                entries.insert("date".to_string(), year);
            }
            (None, Some(date)) => {
                entries.insert("year".to_string(), date);
            }
            _ => {}
        }

        Self { entries }
    }

    /// Value for a rule tag name.
    pub fn get(&self, name: TagName) -> Option<&str> {
        let value = self.entries.get(name.as_str()).or_else(|| match name {
            TagName::Comment => self.entries.get("comments"),
            _ => None,
        });
        value.map(String::as_str)
    }

    /// Value for any key, matched case-insensitively.
    pub fn get_raw(&self, key: &str) -> Option<&str> {
        self.entries.get(&key.to_lowercase()).map(String::as_str)
    }
}
