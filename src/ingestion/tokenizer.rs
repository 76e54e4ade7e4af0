use std::io;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

/// Incremental whitespace splitter over a buffered byte stream.
///
/// Words are maximal runs of non-whitespace bytes; delimiters are runs of one
/// or more ASCII whitespace bytes, so leading, trailing, and repeated
/// whitespace never yield empty tokens. The input is read through the buffered
/// reader chunk by chunk (nothing close to the full stream is ever held in
/// memory) and a token that straddles a buffer refill is reassembled.
///
/// The sequence is single-pass: driving `next_word` to `None` exhausts the
/// underlying stream, and dropping the tokenizer closes it.
pub struct Tokenizer<R> {
    reader: R,
}

impl<R: AsyncBufRead + Unpin> Tokenizer<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }

    /// Next word in stream order, or `None` once the stream is exhausted.
    pub async fn next_word(&mut self) -> io::Result<Option<String>> {
        let mut word: Vec<u8> = Vec::new();
        loop {
            let consumed;
            let at_delimiter;
            {
                let available = self.reader.fill_buf().await?;
                if available.is_empty() {
                    if word.is_empty() {
                        return Ok(None);
                    }
                    return Ok(Some(into_token(&word)));
                }
                match available.iter().position(|b| b.is_ascii_whitespace()) {
                    Some(pos) => {
                        word.extend_from_slice(&available[..pos]);
                        consumed = pos + 1;
                        at_delimiter = true;
                    }
                    None => {
                        word.extend_from_slice(available);
                        consumed = available.len();
                        at_delimiter = false;
                    }
                }
            }
            self.reader.consume(consumed);
            if at_delimiter && !word.is_empty() {
                return Ok(Some(into_token(&word)));
            }
        }
    }
}

fn into_token(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}
