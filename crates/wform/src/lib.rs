#![forbid(unsafe_code)]

//! wform: render webform schemas and keep their conditional states live.
//!
//! ```text
//! Webform JSON ─► wform-core ─► wform-runtime ─► wform-widgets
//!   (schema)       (model)       (state engine)    (HTML, submit)
//! ```
//!
//! Most users only need the [`prelude`].

pub use wform_core::{
    Condition, ConditionSet, FormConfig, StateDeclaration, StateMapping, Webform, WebformElement,
};
pub use wform_runtime::{
    ControllingElement, Document, EnginePhase, SelectorError, StateEngine, StatesError,
};
#[cfg(feature = "widgets")]
pub use wform_widgets::{Form, SubmitError, SubmitHooks, SubmitOutcome, SubmitTransport};

pub mod prelude {
    pub use wform_core::mapping::{CHECKED, DISABLED, INVISIBLE, REQUIRED, VISIBLE};
    pub use wform_core::{
        ConditionSet, FormConfig, StateDeclaration, StateMapping, Webform, WebformElement,
    };
    pub use wform_runtime::{
        ControllingElement, Document, ElementHandle, Observable, StateEngine, StatesError,
        Subscription,
    };

    #[cfg(feature = "widgets")]
    pub use wform_widgets::{
        ElementRenderer, Form, Markup, RenderContext, SubmitError, SubmitHooks, SubmitOutcome,
        SubmitTransport, TransportError,
    };
}
