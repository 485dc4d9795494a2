//! Shared helpers for the integration tests
#![allow(dead_code)]

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, ObjectId, Stream};
use smart_screener::input::ResumeDocument;
use smart_screener::llm::{ChatRequest, ChatTransport};
use smart_screener::{Result, ScreenerError};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// What to put on a generated page
pub enum PageSpec<'a> {
    Text(&'a str),
    Blank,
    /// Contents points at an object that does not exist
    DanglingContents,
    /// Tf with a number where the font name belongs, so text extraction errors
    BadFontOperand,
}

/// Build a PDF with one page per entry, Courier text on each
pub fn build_pdf(pages: &[PageSpec<'_>]) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => font_id,
        },
    });

    let mut kids: Vec<Object> = Vec::new();
    for page in pages {
        let contents_id: ObjectId = match page {
            PageSpec::Text(text) => {
                let content = Content {
                    operations: vec![
                        Operation::new("BT", vec![]),
                        Operation::new("Tf", vec!["F1".into(), 12.into()]),
                        Operation::new("Td", vec![72.into(), 720.into()]),
                        Operation::new("Tj", vec![Object::string_literal(*text)]),
                        Operation::new("ET", vec![]),
                    ],
                };
                doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()))
            }
            PageSpec::Blank => {
                let content = Content { operations: vec![] };
                doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()))
            }
            PageSpec::DanglingContents => (9_999, 0),
            PageSpec::BadFontOperand => {
                let content = Content {
                    operations: vec![
                        Operation::new("BT", vec![]),
                        Operation::new("Tf", vec![12.into(), 12.into()]),
                        Operation::new("Tj", vec![Object::string_literal("Lost")]),
                        Operation::new("ET", vec![]),
                    ],
                };
                doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()))
            }
        };

        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => contents_id,
            "Resources" => resources_id,
        });
        kids.push(page_id.into());
    }

    let pages_dict = dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => pages.len() as i64,
        "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages_dict));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer).unwrap();
    buffer
}

pub fn text_pdf(texts: &[&str]) -> Vec<u8> {
    let pages: Vec<PageSpec<'_>> = texts.iter().map(|t| PageSpec::Text(*t)).collect();
    build_pdf(&pages)
}

pub fn resume(file_name: &str, text: &str) -> ResumeDocument {
    ResumeDocument::new(file_name, text_pdf(&[text]))
}

/// Canned provider: replies from a queue and counts every call
#[derive(Default)]
pub struct StubTransport {
    responses: Mutex<VecDeque<Result<String>>>,
    calls: AtomicUsize,
    last_request: Mutex<Option<ChatRequest>>,
    last_api_key: Mutex<Option<String>>,
}

impl StubTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn replying(content: &str) -> Self {
        let stub = Self::new();
        stub.push_content(content);
        stub
    }

    pub fn push_content(&self, content: &str) {
        self.responses.lock().unwrap().push_back(Ok(content.to_string()));
    }

    pub fn push_error(&self, error: ScreenerError) {
        self.responses.lock().unwrap().push_back(Err(error));
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<ChatRequest> {
        self.last_request.lock().unwrap().clone()
    }

    pub fn last_api_key(&self) -> Option<String> {
        self.last_api_key.lock().unwrap().clone()
    }
}

impl ChatTransport for StubTransport {
    async fn send(&self, api_key: &str, request: &ChatRequest) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_request.lock().unwrap() = Some(request.clone());
        *self.last_api_key.lock().unwrap() = Some(api_key.to_string());

        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ScreenerError::ProviderFailure("no canned response left".to_string())))
    }
}
