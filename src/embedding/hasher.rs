/// Length of the hex prefix used as a content-addressed id.
const ID_LEN: usize = 16;

/// Stable content-addressed id for a piece of text. The same text always
/// maps to the same id, which is what keeps graph node ids and vector-store
/// ids consistent across indexing passes and store backends.
pub fn content_id(text: &str) -> String {
    let mut hex = blake3::hash(text.as_bytes()).to_hex().to_string();
    hex.truncate(ID_LEN);
    hex
}
