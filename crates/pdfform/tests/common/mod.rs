//! In-memory PDF fixtures shared by the integration tests.

#![allow(dead_code)]

use lopdf::{Dictionary, Document, Object, ObjectId, Stream, dictionary};

/// Field names of the simple reference form, in `/Fields` order.
pub const SIMPLE_FORM_FIELDS: [&str; 17] = [
    "Given Name Text Box",
    "Family Name Text Box",
    "House nr Text Box",
    "Address 2 Text Box",
    "Postcode Text Box",
    "Country Combo Box",
    "Height Formatted Field",
    "City Text Box",
    "Driving License Check Box",
    "Favourite Colour List Box",
    "Language 1 Check Box",
    "Language 2 Check Box",
    "Language 3 Check Box",
    "Language 4 Check Box",
    "Language 5 Check Box",
    "Gender List Box",
    "Address 1 Text Box",
];

/// Builds a letter-size document with widgets and an AcroForm.
pub struct FormBuilder {
    pub doc: Document,
    pages_id: ObjectId,
    page_ids: Vec<ObjectId>,
    annots: Vec<Vec<Object>>,
    fields: Vec<Object>,
}

impl FormBuilder {
    pub fn new(page_count: usize) -> Self {
        let mut doc = Document::with_version("1.7");
        let pages_id = doc.new_object_id();
        let page_ids = (0..page_count).map(|_| doc.new_object_id()).collect();
        Self {
            doc,
            pages_id,
            page_ids,
            annots: vec![Vec::new(); page_count],
            fields: Vec::new(),
        }
    }

    pub fn page_id(&self, page: usize) -> ObjectId {
        self.page_ids[page]
    }

    /// Add a widget to `page`'s `/Annots`.
    pub fn widget(&mut self, page: usize, mut dict: Dictionary) -> ObjectId {
        dict.set("Type", "Annot");
        dict.set("Subtype", "Widget");
        dict.set("P", self.page_ids[page]);
        let id = self.doc.add_object(dict);
        self.annots[page].push(Object::Reference(id));
        id
    }

    /// Register a root of the field tree in `/AcroForm /Fields`.
    pub fn root_field(&mut self, id: ObjectId) {
        self.fields.push(Object::Reference(id));
    }

    /// `/AP` dictionary with `Off` and `on_state` normal appearances.
    pub fn checkbox_appearance(&mut self, on_state: &str) -> Dictionary {
        let off = self
            .doc
            .add_object(Stream::new(dictionary! {}, b"0 g".to_vec()));
        let on = self
            .doc
            .add_object(Stream::new(dictionary! {}, b"0 g 1 1 8 8 re f".to_vec()));
        dictionary! {
            "N" => dictionary! { "Off" => off, on_state => on },
        }
    }

    pub fn build(mut self) -> Document {
        let mut kids = Vec::new();
        for (index, page_id) in self.page_ids.iter().enumerate() {
            let content_id = self.doc.add_object(Stream::new(
                dictionary! {},
                format!("BT /F1 12 Tf 72 760 Td (Page {}) Tj ET", index + 1).into_bytes(),
            ));
            let mut page = dictionary! {
                "Type" => "Page",
                "Parent" => self.pages_id,
                "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
                "Contents" => content_id,
            };
            if !self.annots[index].is_empty() {
                page.set("Annots", std::mem::take(&mut self.annots[index]));
            }
            self.doc.objects.insert(*page_id, Object::Dictionary(page));
            kids.push(Object::Reference(*page_id));
        }

        let font_id = self.doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
        });
        self.doc.objects.insert(
            self.pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => self.page_ids.len() as i64,
                "Resources" => dictionary! {
                    "Font" => dictionary! { "F1" => font_id },
                },
            }),
        );

        let mut catalog = dictionary! {
            "Type" => "Catalog",
            "Pages" => self.pages_id,
        };
        if !self.fields.is_empty() {
            catalog.set("AcroForm", dictionary! { "Fields" => self.fields });
        }
        let catalog_id = self.doc.add_object(catalog);
        self.doc.trailer.set("Root", catalog_id);
        self.doc
    }

    pub fn to_bytes(self) -> Vec<u8> {
        save(self.build())
    }
}

pub fn save(mut doc: Document) -> Vec<u8> {
    let mut buf = Vec::new();
    doc.save_to(&mut buf).expect("failed to save test PDF");
    buf
}

fn rect(x: i64, y: i64, w: i64, h: i64) -> Object {
    vec![x.into(), y.into(), (x + w).into(), (y + h).into()].into()
}

/// A one-page form with the 17 flat fields of [`SIMPLE_FORM_FIELDS`].
///
/// Each field is merged with its widget. Names ending in `Check Box` are
/// checkboxes with an `Off`/`Yes` appearance, `Combo Box` and `List Box`
/// are choice fields, everything else is a text field.
pub fn simple_form() -> Vec<u8> {
    let mut builder = FormBuilder::new(1);
    for (i, name) in SIMPLE_FORM_FIELDS.iter().enumerate() {
        let y = 740 - 40 * i as i64;
        let mut dict = dictionary! {
            "T" => Object::string_literal(*name),
        };
        if name.ends_with("Check Box") {
            let ap = builder.checkbox_appearance("Yes");
            dict.set("FT", "Btn");
            dict.set("AS", "Off");
            dict.set("V", "Off");
            dict.set("AP", ap);
            dict.set("Rect", rect(300, y, 12, 12));
        } else if name.ends_with("Combo Box") || name.ends_with("List Box") {
            dict.set("FT", "Ch");
            dict.set("Rect", rect(300, y, 150, 20));
        } else {
            dict.set("FT", "Tx");
            dict.set("Rect", rect(300, y, 150, 20));
        }
        let id = builder.widget(0, dict);
        builder.root_field(id);
    }
    builder.to_bytes()
}

/// Checkbox partial names of [`hierarchical_form`].
pub const HIERARCHICAL_CHECKBOXES: [&str; 2] = [
    "_A_citizen_of_the_United_States[0]",
    "I_did_not_use_a_preparer_or_translator[0]",
];

/// A two-page form whose fields hang below `topmostSubform[0]` and one
/// subform per page, the layout produced by XFA-derived forms.
pub fn hierarchical_form() -> Vec<u8> {
    let mut builder = FormBuilder::new(2);
    let root_id = builder.doc.new_object_id();
    let page1_id = builder.doc.new_object_id();
    let page2_id = builder.doc.new_object_id();

    let last_name = builder.widget(
        0,
        dictionary! {
            "FT" => "Tx",
            "T" => Object::string_literal("Last_Name_Family_Name[0]"),
            "Parent" => page1_id,
            "Rect" => rect(40, 700, 200, 20),
        },
    );
    let mut page1_kids = vec![Object::Reference(last_name)];
    for (i, name) in HIERARCHICAL_CHECKBOXES.iter().enumerate() {
        let ap = builder.checkbox_appearance("Yes");
        let id = builder.widget(
            0,
            dictionary! {
                "FT" => "Btn",
                "T" => Object::string_literal(*name),
                "Parent" => page1_id,
                "AS" => "Off",
                "AP" => ap,
                "Rect" => rect(40, 600 - 40 * i as i64, 10, 10),
            },
        );
        page1_kids.push(Object::Reference(id));
    }

    let middle = builder.widget(
        1,
        dictionary! {
            "FT" => "Tx",
            "T" => Object::string_literal("MI[0]"),
            "Parent" => page2_id,
            "Rect" => rect(40, 700, 40, 20),
        },
    );
    let state = builder.widget(
        1,
        dictionary! {
            "FT" => "Ch",
            "T" => Object::string_literal("State[0]"),
            "Parent" => page2_id,
            "Rect" => rect(40, 650, 60, 20),
        },
    );

    builder.doc.objects.insert(
        page1_id,
        Object::Dictionary(dictionary! {
            "T" => Object::string_literal("Page1[0]"),
            "Parent" => root_id,
            "Kids" => page1_kids,
        }),
    );
    builder.doc.objects.insert(
        page2_id,
        Object::Dictionary(dictionary! {
            "T" => Object::string_literal("Page2[0]"),
            "Parent" => root_id,
            "Kids" => vec![Object::Reference(middle), Object::Reference(state)],
        }),
    );
    builder.doc.objects.insert(
        root_id,
        Object::Dictionary(dictionary! {
            "T" => Object::string_literal("topmostSubform[0]"),
            "Kids" => vec![Object::Reference(page1_id), Object::Reference(page2_id)],
        }),
    );
    builder.root_field(root_id);
    builder.to_bytes()
}

/// A single page without annotations or AcroForm.
pub fn blank_pdf() -> Vec<u8> {
    FormBuilder::new(1).to_bytes()
}

/// The `/Annots` array of page `page` of a serialized document.
pub fn page_annots(doc: &Document, page: usize) -> Vec<Object> {
    let page_id = *doc.get_pages().values().nth(page).expect("page exists");
    let page = doc.get_object(page_id).and_then(Object::as_dict).unwrap();
    match page.get(b"Annots") {
        Ok(Object::Array(items)) => items.clone(),
        Ok(Object::Reference(id)) => doc.get_object(*id).and_then(Object::as_array).unwrap().clone(),
        _ => Vec::new(),
    }
}

/// The annotation dictionary with partial name `name`.
pub fn widget_named<'a>(doc: &'a Document, name: &str) -> &'a Dictionary {
    doc.objects
        .values()
        .filter_map(|obj| obj.as_dict().ok())
        .find(|dict| {
            dict.get(b"T")
                .and_then(Object::as_str)
                .is_ok_and(|t| t == name.as_bytes())
        })
        .unwrap_or_else(|| panic!("no widget named {name}"))
}

/// Whether the catalog's AcroForm has `/NeedAppearances true`.
pub fn need_appearances(doc: &Document) -> bool {
    let catalog = doc.catalog().unwrap();
    let form = match catalog.get(b"AcroForm") {
        Ok(Object::Reference(id)) => doc.get_object(*id).and_then(Object::as_dict).unwrap(),
        Ok(Object::Dictionary(dict)) => dict,
        _ => return false,
    };
    matches!(form.get(b"NeedAppearances"), Ok(Object::Boolean(true)))
}
