//! Streaming reveal.
//!
//! A bot reply is received in full before anything is shown. [`Reveal`]
//! yields the successive prefixes displayed while the reply is "typed out",
//! one character (Unicode scalar value) at a time. Timing is not its
//! concern: the consumer decides how long to wait between frames.

/// Iterator over the growing prefixes of a fully received text
///
/// For a text of N characters it yields exactly N prefixes of strictly
/// increasing length; the last one is the full text.
#[derive(Debug, Clone)]
pub struct Reveal<'a> {
    text: &'a str,
    cursor: usize,
}

impl<'a> Reveal<'a> {
    pub fn new(text: &'a str) -> Self {
        Self { text, cursor: 0 }
    }
}

impl<'a> Iterator for Reveal<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        let ch = self.text[self.cursor..].chars().next()?;
        self.cursor += ch.len_utf8();
        Some(&self.text[..self.cursor])
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.text[self.cursor..].chars().count();
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Reveal<'_> {}

impl std::iter::FusedIterator for Reveal<'_> {}
