use crate::PDFError;
use pdf_writer::Ref;
use std::collections::HashMap;

/// Every kind of object the document writes, keyed by the index of whatever it belongs to
#[derive(Eq, PartialEq, Hash, Copy, Clone, Debug)]
pub enum RefType {
    Catalog,
    Info,
    PageTree,
    Page(usize),
    ContentForPage(usize),
    Font(usize),
    CidFont(usize),
    ToUnicode(usize),
    FontDescriptor(usize),
    FontData(usize),
    Image(usize),
    ImageMask(usize),
    FormXObject(usize),
    /// A fillable field, by page index and position on that page
    Field(usize, usize),
    /// The font form fields are typed in
    FieldFont,
}

/// Hands out PDF object ids and remembers which object each one was given to
pub struct ObjectReferences {
    refs: HashMap<RefType, Ref>,
    next_id: i32,
}

impl ObjectReferences {
    pub fn new() -> ObjectReferences {
        ObjectReferences {
            refs: HashMap::new(),
            next_id: 1,
        }
    }

    pub fn get(&self, ref_type: RefType) -> Option<Ref> {
        self.refs.get(&ref_type).copied()
    }

    /// Like [ObjectReferences::get], for objects that must have been generated already
    pub fn require(&self, ref_type: RefType) -> Result<Ref, PDFError> {
        self.get(ref_type)
            .ok_or_else(|| PDFError::MissingReference(format!("{ref_type:?}")))
    }

    pub fn gen(&mut self, ref_type: RefType) -> Ref {
        let id = Ref::new(self.next_id);
        self.next_id += 1;
        self.refs.insert(ref_type, id);
        id
    }
}
