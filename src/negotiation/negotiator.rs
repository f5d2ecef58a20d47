use super::types::{
    LineDetail, MIME_ANY_APPLICATION, MIME_JSON, MIME_XML, NegotiatedPayload, RandomLineJson,
    Representation,
};
use crate::analysis::frequency::most_frequent_letter;
use crate::analysis::types::SampledLine;
use crate::error::{FileServiceError, Result};

impl Representation {
    /// Picks a representation from a raw `Accept` header value.
    ///
    /// Media ranges are checked in the order the client listed them,
    /// parameters such as `q=` are ignored. If none is recognised the plain
    /// text fallback applies. A missing or blank header is an error.
    pub fn from_accept(accept: Option<&str>) -> Result<Self> {
        let accept = accept
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .ok_or(FileServiceError::MissingNegotiationHeader)?;

        let chosen = accept
            .split(',')
            .filter_map(|range| range.split(';').next())
            .map(|media| media.trim().to_ascii_lowercase())
            .find_map(|media| match media.as_str() {
                MIME_JSON => Some(Self::Json),
                MIME_XML => Some(Self::Xml),
                MIME_ANY_APPLICATION => Some(Self::Detail),
                _ => None,
            })
            .unwrap_or(Self::PlainText);

        Ok(chosen)
    }
}

/// Shapes a sampled line for the chosen representation.
///
/// `Detail` runs the frequency analysis over the lower-cased line and fails
/// with `NoAlphabeticContent` when there is nothing to count.
pub fn render(
    representation: Representation,
    sampled: SampledLine,
    filename: &str,
) -> Result<NegotiatedPayload> {
    let payload = match representation {
        Representation::Json => NegotiatedPayload::Json(RandomLineJson {
            random_line: sampled.content,
        }),
        Representation::Xml => NegotiatedPayload::Xml(xml_document(&sampled.content)),
        Representation::Detail => {
            let frequency = most_frequent_letter(&sampled.content.to_lowercase())?;
            NegotiatedPayload::Detail(LineDetail {
                line_number: sampled.index,
                filename: filename.to_string(),
                most_freq_letter: frequency.letter,
            })
        }
        Representation::PlainText => NegotiatedPayload::PlainText(sampled.content),
    };

    Ok(payload)
}

fn xml_document(line: &str) -> String {
    format!(
        "<?xml version=\"1.0\"?>\n\
         <shampoo>\n\
         \x20   <Header>\n\
         \x20       Random Line\n\
         \x20   </Header>\n\
         \x20   <Body>\n\
         \x20       {}\n\
         \x20   </Body>\n\
         </shampoo>\n",
        xml_escape(line)
    )
}

fn xml_escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
    out
}
