const CHAIN_ALPHABET: &[u8; 52] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// Largest number of chains that can receive a distinct label.
pub const MAX_CHAINS: usize = CHAIN_ALPHABET.len();

/// Returns the label of the chain declared at position `index`.
///
/// Labels are drawn from uppercase then lowercase Latin letters, so the mapping
/// is stable for a given declaration order and `None` past the 52nd chain.
pub fn chain_label(index: usize) -> Option<char> {
    CHAIN_ALPHABET.get(index).map(|&b| b as char)
}

/// Inverse of [`chain_label`].
pub fn chain_index(label: char) -> Option<usize> {
    match label {
        'A'..='Z' => Some(label as usize - 'A' as usize),
        'a'..='z' => Some(label as usize - 'a' as usize + 26),
        _ => None,
    }
}

pub fn is_chain_label(label: char) -> bool {
    chain_index(label).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chain_label_walks_uppercase_then_lowercase() {
        assert_eq!(chain_label(0), Some('A'));
        assert_eq!(chain_label(25), Some('Z'));
        assert_eq!(chain_label(26), Some('a'));
        assert_eq!(chain_label(51), Some('z'));
    }

    #[test]
    fn chain_label_is_none_once_alphabet_is_exhausted() {
        assert_eq!(chain_label(MAX_CHAINS), None);
        assert_eq!(chain_label(1000), None);
    }

    #[test]
    fn chain_index_inverts_chain_label_for_every_label() {
        for i in 0..MAX_CHAINS {
            let label = chain_label(i).unwrap();
            assert_eq!(chain_index(label), Some(i));
        }
    }

    #[test]
    fn chain_index_rejects_non_letters() {
        assert_eq!(chain_index('1'), None);
        assert_eq!(chain_index(' '), None);
        assert!(!is_chain_label('é'));
    }
}
