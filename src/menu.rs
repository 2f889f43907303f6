/*!
 * Gopher menu decoding
 */

use std::fmt;
use std::str::FromStr;

use crate::error::{GopherdexError, Result};
use crate::logger;

/// Gopher item types the crawler acts on. Every other type character is
/// carried through as [`ItemType::Other`] and skipped during traversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemType {
    /// `0` - plain text file
    Text,
    /// `1` - directory (menu)
    Directory,
    /// `3` - error / invalid reference
    Error,
    /// `9` - binary file
    Binary,
    /// `i` - informational line with no resource behind it
    Info,
    /// Anything else in the Gopher type alphabet
    Other(char),
}

impl From<char> for ItemType {
    fn from(c: char) -> Self {
        match c {
            '0' => ItemType::Text,
            '1' => ItemType::Directory,
            '3' => ItemType::Error,
            '9' => ItemType::Binary,
            'i' => ItemType::Info,
            other => ItemType::Other(other),
        }
    }
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = match self {
            ItemType::Text => '0',
            ItemType::Directory => '1',
            ItemType::Error => '3',
            ItemType::Binary => '9',
            ItemType::Info => 'i',
            ItemType::Other(c) => *c,
        };
        write!(f, "{c}")
    }
}

/// A decoded line of a Gopher menu
#[derive(Debug, Clone)]
pub struct MenuEntry {
    pub item_type: ItemType,
    /// Human-readable label; not used for traversal
    pub display: String,
    /// Server-opaque resource identifier
    pub selector: String,
    pub host: String,
    pub port: u16,
}

impl FromStr for MenuEntry {
    type Err = GopherdexError;

    fn from_str(line: &str) -> Result<Self> {
        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() < 4 {
            return Err(GopherdexError::MalformedLine(line.to_string()));
        }

        let mut chars = fields[0].chars();
        let type_char = chars
            .next()
            .ok_or_else(|| GopherdexError::MalformedLine(line.to_string()))?;
        let port = fields[3]
            .parse::<u16>()
            .map_err(|_| GopherdexError::MalformedPort(fields[3].to_string()))?;

        Ok(MenuEntry {
            item_type: ItemType::from(type_char),
            display: chars.as_str().to_string(),
            selector: fields[1].to_string(),
            host: fields[2].to_string(),
            port,
        })
    }
}

/// Decode a menu response into its entries, in source order.
///
/// Validation is per line: lines without a TAB (blank lines, the `.`
/// terminator, stray headers) are silently skipped, lines with too few
/// fields or an unparseable port are logged and skipped. One malformed row
/// never loses the whole directory.
pub fn parse_menu(body: &str) -> Vec<MenuEntry> {
    let mut entries = Vec::new();

    for line in body.split('\n') {
        if !line.contains('\t') {
            continue;
        }
        match line.parse::<MenuEntry>() {
            Ok(entry) => entries.push(entry),
            Err(err @ GopherdexError::MalformedPort(_)) => logger::severe(err.to_string()),
            Err(err) => logger::warning(err.to_string()),
        }
    }

    entries
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_fields() {
        let entry: MenuEntry = "0Some file\t/docs/file.txt\texample.org\t70"
            .parse()
            .unwrap();
        assert_eq!(entry.item_type, ItemType::Text);
        assert_eq!(entry.display, "Some file");
        assert_eq!(entry.selector, "/docs/file.txt");
        assert_eq!(entry.host, "example.org");
        assert_eq!(entry.port, 70);
    }

    #[test]
    fn test_entry_with_extra_fields() {
        // Gopher+ lines carry extra tab-separated fields; they are ignored
        let entry: MenuEntry = "1dir\t/dir\texample.org\t70\t+".parse().unwrap();
        assert_eq!(entry.item_type, ItemType::Directory);
        assert_eq!(entry.selector, "/dir");
    }

    #[test]
    fn test_entry_too_few_fields() {
        let err = "0file\t/file\texample.org".parse::<MenuEntry>().unwrap_err();
        assert!(matches!(err, GopherdexError::MalformedLine(_)));
    }

    #[test]
    fn test_entry_bad_port() {
        let err = "0file\t/file\texample.org\tseventy"
            .parse::<MenuEntry>()
            .unwrap_err();
        assert!(matches!(err, GopherdexError::MalformedPort(_)));
    }

    #[test]
    fn test_unknown_type_preserved() {
        let entry: MenuEntry = "hWeb link\tURL:http://example.org\texample.org\t70"
            .parse()
            .unwrap();
        assert_eq!(entry.item_type, ItemType::Other('h'));
    }

    #[test]
    fn test_parse_menu_skips_invalid_lines() {
        let body = "1Docs\t/docs\texample.org\t70\n\
                    no tabs on this line\n\
                    0file\t/file\texample.org\tNaN\n\
                    0short\t/short\n\
                    iJust info\t\terror.host\t1\n\
                    .";
        let entries = parse_menu(body);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].item_type, ItemType::Directory);
        assert_eq!(entries[1].item_type, ItemType::Info);
    }

    #[test]
    fn test_parse_menu_preserves_order() {
        let body = "0a\t/a\th\t70\n0b\t/b\th\t70\n0c\t/c\th\t70";
        let selectors: Vec<String> = parse_menu(body).into_iter().map(|e| e.selector).collect();
        assert_eq!(selectors, vec!["/a", "/b", "/c"]);
    }
}
