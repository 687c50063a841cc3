use std::io;

use encoding_rs::{Encoding, UTF_8};
use markup5ever_rcdom::RcDom;
use thiserror::Error;
use tracing::debug;

use crate::parsers::html::{get_charset, html_to_dom, serialize_document};
use crate::sanitizer::Sanitizer;

const ANSI_COLOR_RED: &str = "\x1b[31m";
const ANSI_COLOR_RESET: &str = "\x1b[0m";
const DEFAULT_DOCUMENT_ENCODING: &str = "utf-8";

/// Errors that can occur while cleaning a document
///
/// The passes themselves never fail; everything here comes from reading the
/// input, decoding it, or writing the result back out.
#[derive(Debug, Error)]
pub enum CleanError {
    /// Nothing to clean: the input was absent or zero bytes long
    #[error("no input data")]
    Input,

    #[error("failed to parse document: {0}")]
    Parse(String),

    #[error("unknown encoding \"{0}\"")]
    UnknownEncoding(String),

    #[error("failed to serialize document: {0}")]
    Serialize(#[from] io::Error),
}

/// Options for a single cleaning run
#[derive(Clone, Debug, Default)]
pub struct CleanOptions {
    /// Charset to decode the input with, overriding whatever the document declares
    pub encoding: Option<String>,
    /// Suppress informational output in the front ends
    pub silent: bool,
}

/// Cleans a Word-exported HTML document
///
/// Decodes `input_data`, runs the whole sanitization pipeline over it and
/// returns the result serialized as UTF-8.
pub fn clean_word_html(input_data: &[u8], options: &CleanOptions) -> Result<Vec<u8>, CleanError> {
    DocumentProcessor::new(options.clone()).process_document(input_data)
}

/// Parses Content-Type header value
pub fn parse_content_type(content_type: &str) -> (String, String, bool) {
    let mut media_type = String::new();
    let mut charset = String::new();
    let mut is_base64 = false;

    let parts: Vec<&str> = content_type.split(';').collect();

    if !parts.is_empty() {
        media_type = parts[0].trim().to_lowercase();
    }

    for part in parts.iter().skip(1) {
        let part = part.trim();
        if let Some(value) = part
            .get(..8)
            .filter(|key| key.eq_ignore_ascii_case("charset="))
            .map(|_| &part[8..])
        {
            charset = value.trim_matches('"').to_string();
        } else if part == "base64" {
            is_base64 = true;
        }
    }

    (media_type, charset, is_base64)
}

/// Prints an error message to stderr
pub fn print_error_message(msg: &str) {
    eprintln!("{ANSI_COLOR_RED}{msg}{ANSI_COLOR_RESET}");
}

/// Prints an info message to stdout
pub fn print_info_message(msg: &str) {
    println!("{msg}");
}

/// Drives one document from bytes to cleaned bytes
pub struct DocumentProcessor {
    options: CleanOptions,
}

impl DocumentProcessor {
    pub fn new(options: CleanOptions) -> Self {
        Self { options }
    }

    pub fn process_document(&self, input_data: &[u8]) -> Result<Vec<u8>, CleanError> {
        if input_data.is_empty() {
            return Err(CleanError::Input);
        }

        // 1. validate options
        EncodingValidator::new().validate_options(&self.options)?;

        // 2. decode and parse
        let (dom, document_encoding) =
            EncodingProcessor::new().process_encoding(input_data, self.options.encoding.clone())?;

        // 3. sanitize
        let dom = Sanitizer::new().sanitize(dom);
        debug!(encoding = %document_encoding, "document cleaned");

        // 4. serialize, always as UTF-8
        Ok(serialize_document(dom)?)
    }
}

pub struct EncodingValidator;

impl EncodingValidator {
    pub fn new() -> Self {
        Self
    }

    pub fn validate_options(&self, options: &CleanOptions) -> Result<(), CleanError> {
        if let Some(input_encoding) = &options.encoding {
            if Encoding::for_label_no_replacement(input_encoding.as_bytes()).is_none() {
                return Err(CleanError::UnknownEncoding(input_encoding.clone()));
            }
        }
        Ok(())
    }
}

impl Default for EncodingValidator {
    fn default() -> Self {
        Self::new()
    }
}

/// Works out which charset a document is written in and parses it with that
pub struct EncodingProcessor;

impl EncodingProcessor {
    pub fn new() -> Self {
        Self
    }

    /// Parses `input_data`, returning the DOM and the encoding it was decoded with
    ///
    /// An explicit `input_encoding` is used as-is. Otherwise the bytes are read
    /// as UTF-8 first, and parsed again if the document declares some other
    /// known charset.
    pub fn process_encoding(
        &self,
        input_data: &[u8],
        input_encoding: Option<String>,
    ) -> Result<(RcDom, String), CleanError> {
        if let Some(input_encoding) = input_encoding {
            let dom = html_to_dom(input_data, &input_encoding)?;
            return Ok((dom, input_encoding));
        }

        let mut document_encoding = DEFAULT_DOCUMENT_ENCODING.to_string();
        let mut dom = html_to_dom(input_data, &document_encoding)?;

        if let Some(html_charset) = get_charset(&dom.document) {
            // a declared UTF-16 means UTF-8 here; real UTF-16 input was already
            // picked up from its byte order mark
            if let Some(document_charset) =
                Encoding::for_label_no_replacement(html_charset.as_bytes())
                    .map(Encoding::output_encoding)
            {
                if document_charset != UTF_8 {
                    debug!(charset = document_charset.name(), "re-parsing with declared charset");
                    dom = html_to_dom(input_data, document_charset.name())?;
                }
                document_encoding = html_charset;
            }
        }

        Ok((dom, document_encoding))
    }
}

impl Default for EncodingProcessor {
    fn default() -> Self {
        Self::new()
    }
}
