//! Item create/edit form.

use crate::search_bar::parse_price;
use crate::Intent;
use std::fmt;
use storefront_core::catalog::{Item, ItemDraft};
use storefront_core::ItemId;
use thiserror::Error;

/// Whether the form creates or edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(ItemId),
}

/// A form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    Price,
    Category,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Field::Name => "name",
            Field::Price => "price",
            Field::Category => "category",
        })
    }
}

/// A validation failure on one field.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    #[error("Name is required")]
    NameRequired,

    #[error("Price is required")]
    PriceRequired,

    #[error("Price is not a number: {0}")]
    PriceInvalid(String),

    #[error("Price must be at least 0")]
    PriceNegative,

    #[error("Category is required")]
    CategoryRequired,

    #[error("Unknown category: {0}")]
    UnknownCategory(String),
}

/// Every failing field of a form.
#[derive(Error, Debug, Clone, PartialEq, Eq, Default)]
#[error("{}", render_errors(.errors))]
pub struct FormErrors {
    pub errors: Vec<(Field, FieldError)>,
}

impl FormErrors {
    /// The error for one field.
    pub fn get(&self, field: Field) -> Option<&FieldError> {
        self.errors
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, e)| e)
    }

    fn push(&mut self, field: Field, error: FieldError) {
        self.errors.push((field, error));
    }
}

fn render_errors(errors: &[(Field, FieldError)]) -> String {
    errors
        .iter()
        .map(|(field, error)| format!("{}: {}", field, error))
        .collect::<Vec<_>>()
        .join("; ")
}

/// A validated form, ready to persist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormSubmission {
    Create(ItemDraft),
    Update(Item),
}

/// Raw text of the item form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemForm {
    pub mode: FormMode,
    pub name: String,
    pub price: String,
    pub category: String,
    /// Categories the form accepts.
    pub categories: Vec<String>,
}

impl ItemForm {
    /// An empty form for a new item.
    pub fn create(categories: Vec<String>) -> Self {
        Self {
            mode: FormMode::Create,
            name: String::new(),
            price: String::new(),
            category: String::new(),
            categories,
        }
    }

    /// A form prefilled from `item`.
    pub fn edit(item: &Item, categories: Vec<String>) -> Self {
        Self {
            mode: FormMode::Edit(item.id),
            name: item.name.clone(),
            price: item.price.display_amount(),
            category: item.category.clone(),
            categories,
        }
    }

    /// Check if the form edits an existing item.
    pub fn is_edit(&self) -> bool {
        matches!(self.mode, FormMode::Edit(_))
    }

    /// Validate every field.
    pub fn validate(&self) -> Result<FormSubmission, FormErrors> {
        let mut errors = FormErrors::default();

        let name = self.name.trim();
        if name.is_empty() {
            errors.push(Field::Name, FieldError::NameRequired);
        }

        let price = match parse_price(&self.price) {
            Ok(Some(price)) => Some(price),
            Ok(None) => {
                errors.push(Field::Price, FieldError::PriceRequired);
                None
            }
            Err(e) => {
                errors.push(Field::Price, e);
                None
            }
        };

        let category = self.category.trim();
        if category.is_empty() {
            errors.push(Field::Category, FieldError::CategoryRequired);
        } else if !self.categories.iter().any(|c| c == category) {
            errors.push(Field::Category, FieldError::UnknownCategory(category.to_string()));
        }

        match price {
            Some(price) if errors.errors.is_empty() => {
                let draft = ItemDraft::new(name, price, category);
                Ok(match self.mode {
                    FormMode::Create => FormSubmission::Create(draft),
                    FormMode::Edit(id) => FormSubmission::Update(Item::from_draft(id, draft)),
                })
            }
            _ => Err(errors),
        }
    }

    /// Intent for the save button.
    pub fn submit(&self) -> Result<Intent, FormErrors> {
        self.validate().map(Intent::SaveItem)
    }
}

/// Render the form fields and any errors.
pub fn render_item_form(form: &ItemForm, errors: Option<&FormErrors>) -> String {
    let title = match form.mode {
        FormMode::Create => "New item".to_string(),
        FormMode::Edit(id) => format!("Edit item #{}", id),
    };
    let mut lines = vec![
        title,
        format!("  Name:     {}", form.name),
        format!("  Price:    {}", form.price),
        format!("  Category: {} ({})", form.category, form.categories.join(", ")),
    ];
    if let Some(errors) = errors {
        lines.extend(errors.errors.iter().map(|(f, e)| format!("  ! {}: {}", f, e)));
    }
    lines.join("\n")
}
