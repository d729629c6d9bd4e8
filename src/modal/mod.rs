pub mod controller;
pub mod form;

pub use controller::{ModalController, ModalError, SubmitOutcome};
pub use form::{
    allocate_record_id, generate_record_id, validate_draft, EntityRecord, EntityValues,
    FieldErrors, FieldKind, FieldSpec, FieldValue, FormDraft, FormSchema,
};
