pub trait StrExt: AsRef<str> {
    /// `Some(trimmed)` when the string has visible content.
    fn nonblank_to_some(&self) -> Option<String> {
        let trimmed = self.as_ref().trim();
        (!trimmed.is_empty()).then(|| trimmed.to_owned())
    }
}

impl<T: AsRef<str>> StrExt for T {}
