//! Utility functions and traits for [`Table`]

use crate::{Result, Table};

/// Extension trait for tables that provides additional utility methods
pub trait TableExtensions<V> {
    /// Returns the keys of the table, in slot order
    fn keys(&self) -> Vec<&[u8]>;

    /// Returns the values of the table, in slot order
    fn values(&self) -> Vec<&V>;

    /// Returns true if the table contains the given key
    fn contains_key<Q>(&self, key: &Q) -> bool
    where
        Q: AsRef<[u8]> + ?Sized;
}

impl<V> TableExtensions<V> for Table<V> {
    fn keys(&self) -> Vec<&[u8]> {
        self.iter().map(|(key, _)| key).collect()
    }

    fn values(&self) -> Vec<&V> {
        self.iter().map(|(_, value)| value).collect()
    }

    fn contains_key<Q>(&self, key: &Q) -> bool
    where
        Q: AsRef<[u8]> + ?Sized,
    {
        self.get(key).is_some()
    }
}

/// Creates a `Table` from an iterator of key-value pairs.
///
/// Later pairs overwrite earlier pairs with the same key.
///
/// # Errors
///
/// Returns the first allocation error; the partially built table is dropped.
pub fn try_from_iter<K, V, I>(iter: I) -> Result<Table<V>>
where
    K: AsRef<[u8]>,
    I: IntoIterator<Item = (K, V)>,
{
    let mut table = Table::try_new()?;
    for (key, value) in iter {
        table.set(&key, value)?;
    }
    Ok(table)
}

/// Adds one to the count of every token, starting unseen tokens at one.
///
/// # Errors
///
/// Returns the first allocation error. Tokens counted before it stay counted.
pub fn tally_into<T, I>(counts: &mut Table<u64>, tokens: I) -> Result<()>
where
    T: AsRef<[u8]>,
    I: IntoIterator<Item = T>,
{
    for token in tokens {
        if let Some(count) = counts.get_mut(&token) {
            *count = count.saturating_add(1);
        } else {
            counts.set(&token, 1)?;
        }
    }
    Ok(())
}

/// Counts occurrences of each distinct token.
///
/// # Errors
///
/// Returns the first allocation error.
pub fn tally<T, I>(tokens: I) -> Result<Table<u64>>
where
    T: AsRef<[u8]>,
    I: IntoIterator<Item = T>,
{
    let mut counts = Table::try_new()?;
    tally_into(&mut counts, tokens)?;
    Ok(counts)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_try_from_iter() {
        let data = vec![("a", 1), ("b", 2), ("c", 3), ("a", 4)];

        let table = try_from_iter(data).unwrap_or_default();

        assert_eq!(table.get("a"), Some(&4));
        assert_eq!(table.get("b"), Some(&2));
        assert_eq!(table.get("c"), Some(&3));
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn test_keys_and_values() {
        let mut table = Table::new();
        assert!(table.set("a", 1).is_ok());
        assert!(table.set("b", 2).is_ok());
        assert!(table.set("c", 3).is_ok());

        let mut keys = table.keys();
        keys.sort_unstable(); // Sort for predictable comparison

        let mut values = table.values();
        values.sort_unstable();

        assert_eq!(keys, vec![&b"a"[..], &b"b"[..], &b"c"[..]]);
        assert_eq!(values, vec![&1, &2, &3]);
    }

    #[test]
    fn test_contains_key() {
        let mut table = Table::new();
        assert!(table.set("a", 1).is_ok());

        assert!(table.contains_key("a"));
        assert!(!table.contains_key("b"));
    }

    #[test]
    fn test_tally_word_counts() {
        let words = ["foo", "bar", "the", "bar", "bar", "bar", "the"];

        let counts = tally(words).unwrap_or_default();

        assert_eq!(counts.get("foo"), Some(&1));
        assert_eq!(counts.get("bar"), Some(&4));
        assert_eq!(counts.get("the"), Some(&2));
        assert_eq!(counts.len(), 3);
    }

    #[test]
    fn test_tally_into_accumulates() {
        let mut counts = Table::new();
        assert!(tally_into(&mut counts, ["x", "y"]).is_ok());
        assert!(tally_into(&mut counts, ["x"]).is_ok());

        assert_eq!(counts.get("x"), Some(&2));
        assert_eq!(counts.get("y"), Some(&1));
    }
}
