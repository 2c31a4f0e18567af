use super::header::{Header, HEADER_LEN};
use super::name::name_byte_length;
use super::read_u16;
use dnsrelay_domain::{DomainError, Question};

/// The single question of a message, plus where it ends.
#[derive(Debug, Clone)]
pub struct ParsedQuestion {
    pub header: Header,
    pub question: Question,
    /// Byte offset in the original buffer where the question section ends.
    pub question_end: usize,
}

/// Extracts the one question of a query or response.
///
/// Rejects buffers shorter than a header, any QDCOUNT other than 1, and
/// question sections that run off the end of the buffer.
pub fn parse_question(buf: &[u8]) -> Result<ParsedQuestion, DomainError> {
    let header = Header::parse(buf)?;
    if header.qdcount != 1 {
        return Err(DomainError::UnsupportedQuestionCount(header.qdcount));
    }

    let remaining = buf.len() - HEADER_LEN;
    let name_len = name_byte_length(&buf[HEADER_LEN..], remaining);
    let name_end = HEADER_LEN + name_len;
    if name_end + 4 > buf.len() {
        return Err(DomainError::MalformedPacket(
            "question section is incomplete".to_string(),
        ));
    }

    let question = Question::new(
        &buf[HEADER_LEN..name_end],
        read_u16(buf, name_end),
        read_u16(buf, name_end + 2),
    );

    Ok(ParsedQuestion {
        header,
        question,
        question_end: name_end + 4,
    })
}
