//! Form session state machine.
//!
//! ```text
//! Empty --load--> Populated --edit--> Editing --submit--> Submitting
//!                                        ^                    |
//!                                        +---- rejected ------+--- accepted --> Submitted
//! ```
//!
//! Loading a new schema (or `reset`) always restarts at `Empty`.
//!
//! When the schema has an `items` group with a quantity-like and a price-like
//! number field, every row carries a computed `total` and the session keeps a
//! `grand_total`; both are refreshed after each row operation or edit.

use super::rules::check_field;
use crate::model::field::{FieldDefinition, FieldType};
use crate::model::schema::FormSchema;
use crate::model::values::{FieldValue, Row, SubmittedValueTree};
use crate::template::validate::validate;
use log::{debug, info};
use serde::{Deserialize, Serialize};

const LINE_ITEMS: &str = "items";
const LINE_TOTAL: &str = "total";
const GRAND_TOTAL: &str = "grand_total";
const QUANTITY_HINTS: [&str; 4] = ["quantity", "qty", "hours", "count"];
const PRICE_HINTS: [&str; 3] = ["price", "rate", "amount"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    Empty,
    Populated,
    Editing,
    Submitting,
    Submitted,
}

/// A failed rule on one field. `path` is `name` for root fields and
/// `array[index].name` for row fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub path: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FormError {
    #[error("no schema is loaded")]
    NoSchema,
    #[error("schema is invalid: {}", .0.join("; "))]
    InvalidSchema(Vec<String>),
    #[error("the form has already been submitted")]
    AlreadySubmitted,
    #[error("unknown field `{0}`")]
    UnknownField(String),
    #[error("unknown array field `{0}`")]
    UnknownArray(String),
    #[error("row {index} does not exist in `{array}` ({len} rows)")]
    RowOutOfRange {
        array: String,
        index: usize,
        len: usize,
    },
    #[error("field `{0}` is computed and cannot be edited")]
    DerivedField(String),
    #[error("submission rejected with {} field errors", .0.len())]
    Rejected(Vec<FieldError>),
}

/// Receiver of accepted submissions.
pub trait SubmissionSink {
    fn submit(&mut self, values: SubmittedValueTree);
}

impl<F: FnMut(SubmittedValueTree)> SubmissionSink for F {
    fn submit(&mut self, values: SubmittedValueTree) {
        self(values)
    }
}

/// Item fields feeding the line totals of the `items` group.
#[derive(Debug, Clone, PartialEq, Eq)]
struct LineTotals {
    quantity: String,
    price: String,
}

impl LineTotals {
    fn detect(schema: &FormSchema) -> Option<Self> {
        let items = schema.array(LINE_ITEMS)?;
        let find = |hints: &[&str]| {
            items
                .items
                .iter()
                .filter(|f| f.field_type == FieldType::Number && f.name != LINE_TOTAL)
                .find(|f| {
                    let name = f.name.to_lowercase();
                    hints.iter().any(|hint| name.contains(hint))
                })
                .map(|f| f.name.clone())
        };
        let quantity = find(&QUANTITY_HINTS)?;
        let price = find(&PRICE_HINTS)?;
        (quantity != price).then_some(LineTotals { quantity, price })
    }
}

#[derive(Debug, Clone)]
pub struct FormSession {
    schema: Option<FormSchema>,
    values: SubmittedValueTree,
    state: SessionState,
    line_totals: Option<LineTotals>,
    errors: Vec<FieldError>,
}

impl Default for FormSession {
    fn default() -> Self {
        Self::new()
    }
}

impl FormSession {
    /// A session in the `Empty` state.
    pub fn new() -> Self {
        Self {
            schema: None,
            values: SubmittedValueTree::default(),
            state: SessionState::Empty,
            line_totals: None,
            errors: Vec::new(),
        }
    }

    pub fn with_schema(schema: FormSchema) -> Result<Self, FormError> {
        let mut session = Self::new();
        session.load(schema)?;
        Ok(session)
    }

    /// Starts a new session for `schema`, discarding the current one.
    ///
    /// An invalid schema is refused with the validator's messages and leaves
    /// the session `Empty`.
    pub fn load(&mut self, schema: FormSchema) -> Result<(), FormError> {
        self.reset();
        let report = validate(&schema);
        if !report.valid {
            return Err(FormError::InvalidSchema(report.errors));
        }
        self.line_totals = LineTotals::detect(&schema);
        self.values = SubmittedValueTree::empty_for(&schema);
        self.schema = Some(schema);
        self.state = SessionState::Populated;
        self.recompute();
        debug!(
            "form session loaded, line totals {}",
            if self.line_totals.is_some() { "on" } else { "off" }
        );
        Ok(())
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn schema(&self) -> Option<&FormSchema> {
        self.schema.as_ref()
    }

    pub fn values(&self) -> &SubmittedValueTree {
        &self.values
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Field errors of the last rejected submission, minus fields edited since.
    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    pub fn errors_for<'a>(&'a self, path: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.errors
            .iter()
            .filter(move |e| e.path == path)
            .map(|e| e.message.as_str())
    }

    pub fn grand_total(&self) -> Option<f64> {
        self.values.grand_total
    }

    pub fn row_count(&self, array: &str) -> usize {
        self.values.rows(array).len()
    }

    pub fn has_line_totals(&self) -> bool {
        self.line_totals.is_some()
    }

    /// Whether a field is computed by the session rather than typed.
    /// `array` is `None` for root fields.
    pub fn is_derived(&self, array: Option<&str>, field: &str) -> bool {
        if self.line_totals.is_none() {
            return false;
        }
        match array {
            None => field == GRAND_TOTAL,
            Some(array) => array == LINE_ITEMS && field == LINE_TOTAL,
        }
    }

    /// Replaces the whole value tree, e.g. with one received over the wire.
    ///
    /// Values are matched against the schema: unknown names are refused,
    /// missing ones start empty, derived values are recomputed.
    pub fn restore(&mut self, values: SubmittedValueTree) -> Result<(), FormError> {
        let schema = self.editable_schema()?;
        if let Some(name) = values.fields.keys().find(|name| {
            schema.field(name).is_none() && !(name.as_str() == GRAND_TOTAL && self.line_totals.is_some())
        }) {
            return Err(FormError::UnknownField(name.clone()));
        }

        let mut restored = SubmittedValueTree::empty_for(schema);
        for (name, value) in values.fields {
            if schema.field(&name).is_some() {
                restored.fields.insert(name, value);
            }
        }
        for (array_name, rows) in values.arrays {
            let array = schema
                .array(&array_name)
                .ok_or_else(|| FormError::UnknownArray(array_name.clone()))?;
            let mut fresh_rows = Vec::with_capacity(rows.len());
            for row in rows {
                let mut fresh = empty_row(&array.items);
                for (field, value) in row {
                    let derived = self.is_derived(Some(array_name.as_str()), &field);
                    if array.item(&field).is_none() && !derived {
                        return Err(FormError::UnknownField(format!("{}.{}", array_name, field)));
                    }
                    fresh.insert(field, value);
                }
                fresh_rows.push(fresh);
            }
            restored.arrays.insert(array_name, fresh_rows);
        }

        self.values = restored;
        self.errors.clear();
        self.state = SessionState::Editing;
        self.recompute();
        Ok(())
    }

    /// Sets a root field.
    pub fn set_field(&mut self, name: &str, value: FieldValue) -> Result<(), FormError> {
        let schema = self.editable_schema()?;
        if schema.field(name).is_none() {
            return Err(FormError::UnknownField(name.to_string()));
        }
        if self.is_derived(None, name) {
            return Err(FormError::DerivedField(name.to_string()));
        }
        self.values.fields.insert(name.to_string(), value);
        self.touched(name);
        Ok(())
    }

    /// Sets a root field from raw input text.
    pub fn set_field_input(&mut self, name: &str, raw: &str) -> Result<(), FormError> {
        let field_type = self
            .schema
            .as_ref()
            .and_then(|s| s.field(name))
            .map(|f| f.field_type)
            .unwrap_or(FieldType::String);
        self.set_field(name, FieldValue::from_input(field_type, raw))
    }

    /// Sets one field of one row.
    pub fn set_row_field(
        &mut self,
        array: &str,
        index: usize,
        field: &str,
        value: FieldValue,
    ) -> Result<(), FormError> {
        let schema = self.editable_schema()?;
        let array_field = schema
            .array(array)
            .ok_or_else(|| FormError::UnknownArray(array.to_string()))?;
        if array_field.item(field).is_none() {
            return Err(FormError::UnknownField(format!("{}.{}", array, field)));
        }
        if self.is_derived(Some(array), field) {
            return Err(FormError::DerivedField(format!("{}.{}", array, field)));
        }
        let rows = self.values.arrays.entry(array.to_string()).or_default();
        let len = rows.len();
        let row = rows.get_mut(index).ok_or_else(|| FormError::RowOutOfRange {
            array: array.to_string(),
            index,
            len,
        })?;
        row.insert(field.to_string(), value);
        self.touched(&format!("{}[{}].{}", array, index, field));
        Ok(())
    }

    /// Sets one field of one row from raw input text.
    pub fn set_row_field_input(
        &mut self,
        array: &str,
        index: usize,
        field: &str,
        raw: &str,
    ) -> Result<(), FormError> {
        let field_type = self
            .schema
            .as_ref()
            .and_then(|s| s.array(array))
            .and_then(|a| a.item(field))
            .map(|f| f.field_type)
            .unwrap_or(FieldType::String);
        self.set_row_field(array, index, field, FieldValue::from_input(field_type, raw))
    }

    /// Appends an empty row and returns its index.
    pub fn add_row(&mut self, array: &str) -> Result<usize, FormError> {
        let schema = self.editable_schema()?;
        let array_field = schema
            .array(array)
            .ok_or_else(|| FormError::UnknownArray(array.to_string()))?;
        let row = empty_row(&array_field.items);
        let rows = self.values.arrays.entry(array.to_string()).or_default();
        rows.push(row);
        let index = rows.len() - 1;
        self.state = SessionState::Editing;
        self.recompute();
        Ok(index)
    }

    /// Removes the row at `index`; later rows move up by one.
    ///
    /// An index past the end is an error and changes nothing.
    pub fn remove_row(&mut self, array: &str, index: usize) -> Result<Row, FormError> {
        let schema = self.editable_schema()?;
        if schema.array(array).is_none() {
            return Err(FormError::UnknownArray(array.to_string()));
        }
        let rows = self.values.arrays.entry(array.to_string()).or_default();
        if index >= rows.len() {
            return Err(FormError::RowOutOfRange {
                array: array.to_string(),
                index,
                len: rows.len(),
            });
        }
        let removed = rows.remove(index);
        // Row errors are addressed by index, which just shifted.
        let prefix = format!("{}[", array);
        self.errors.retain(|e| !e.path.starts_with(&prefix));
        self.state = SessionState::Editing;
        self.recompute();
        Ok(removed)
    }

    /// Runs every field rule against the current values.
    pub fn validate_values(&self) -> Vec<FieldError> {
        let Some(schema) = &self.schema else {
            return Vec::new();
        };
        let mut errors = Vec::new();

        for field in &schema.fields {
            if self.is_derived(None, &field.name) {
                continue;
            }
            push_errors(&mut errors, &field.name, field, self.values.fields.get(&field.name));
        }
        for array in &schema.arrays {
            for (index, row) in self.values.rows(&array.name).iter().enumerate() {
                for item in &array.items {
                    if self.is_derived(Some(&array.name), &item.name) {
                        continue;
                    }
                    let path = format!("{}[{}].{}", array.name, index, item.name);
                    push_errors(&mut errors, &path, item, row.get(&item.name));
                }
            }
        }
        if self.line_totals.is_some() {
            let out_of_range = |v: Option<&FieldValue>| {
                v.and_then(FieldValue::as_number).is_some_and(|n| !n.is_finite())
            };
            for (index, row) in self.values.rows(LINE_ITEMS).iter().enumerate() {
                if out_of_range(row.get(LINE_TOTAL)) {
                    errors.push(FieldError {
                        path: format!("{}[{}].{}", LINE_ITEMS, index, LINE_TOTAL),
                        message: "Total is out of range".to_string(),
                    });
                }
            }
            if self.values.grand_total.is_some_and(|n| !n.is_finite()) {
                errors.push(FieldError {
                    path: GRAND_TOTAL.to_string(),
                    message: "Grand total is out of range".to_string(),
                });
            }
        }
        errors
    }

    /// Validates and, when every rule passes, hands a copy of the values to
    /// `sink`. A rejected submission keeps all values and returns to `Editing`.
    pub fn submit(&mut self, sink: &mut impl SubmissionSink) -> Result<(), FormError> {
        self.editable_schema()?;
        self.state = SessionState::Submitting;
        let errors = self.validate_values();
        if !errors.is_empty() {
            debug!("submission rejected with {} field errors", errors.len());
            self.errors = errors.clone();
            self.state = SessionState::Editing;
            return Err(FormError::Rejected(errors));
        }
        self.errors.clear();
        self.state = SessionState::Submitted;
        info!("form submitted");
        sink.submit(self.values.clone());
        Ok(())
    }

    fn editable_schema(&self) -> Result<&FormSchema, FormError> {
        if self.state == SessionState::Submitted {
            return Err(FormError::AlreadySubmitted);
        }
        self.schema.as_ref().ok_or(FormError::NoSchema)
    }

    fn touched(&mut self, path: &str) {
        self.errors.retain(|e| e.path != path);
        self.state = SessionState::Editing;
        self.recompute();
    }

    fn recompute(&mut self) {
        let Some(totals) = &self.line_totals else {
            return;
        };
        let mut grand_total = 0.0;
        if let Some(rows) = self.values.arrays.get_mut(LINE_ITEMS) {
            for row in rows.iter_mut() {
                let number = |name: &str| row.get(name).and_then(FieldValue::as_number).unwrap_or(0.0);
                let total = number(&totals.quantity) * number(&totals.price);
                row.insert(LINE_TOTAL.to_string(), FieldValue::Number(total));
                grand_total += total;
            }
        }
        self.values.grand_total = Some(grand_total);
        if self.schema.as_ref().is_some_and(|s| s.field(GRAND_TOTAL).is_some()) {
            self.values
                .fields
                .insert(GRAND_TOTAL.to_string(), FieldValue::Number(grand_total));
        }
    }
}

fn empty_row(items: &[FieldDefinition]) -> Row {
    items
        .iter()
        .map(|f| (f.name.clone(), FieldValue::empty_for(f.field_type)))
        .collect()
}

fn push_errors(
    errors: &mut Vec<FieldError>,
    path: &str,
    field: &FieldDefinition,
    value: Option<&FieldValue>,
) {
    errors.extend(check_field(field, value).into_iter().map(|message| FieldError {
        path: path.to_string(),
        message,
    }));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::field::ArrayField;
    use crate::template::schema_from_template;

    const INVOICE: &str = "Invoice {{invoice_number}}, Date {{invoice_date}}, \
        {{#each items}}{{description}} {{quantity}} {{unit_price}}{{/each}}";

    fn invoice_session() -> FormSession {
        FormSession::with_schema(schema_from_template(INVOICE).unwrap()).unwrap()
    }

    fn fill_row(session: &mut FormSession, index: usize, quantity: f64, price: f64) {
        session
            .set_row_field("items", index, "description", FieldValue::Text("Thing".into()))
            .unwrap();
        session
            .set_row_field("items", index, "quantity", FieldValue::Number(quantity))
            .unwrap();
        session
            .set_row_field("items", index, "unit_price", FieldValue::Number(price))
            .unwrap();
    }

    #[test]
    fn starts_empty_and_refuses_edits_without_schema() {
        let mut session = FormSession::new();
        assert_eq!(session.state(), SessionState::Empty);
        assert_eq!(session.add_row("items"), Err(FormError::NoSchema));
    }

    #[test]
    fn refuses_invalid_schema_verbatim() {
        let schema = FormSchema::new(Vec::new(), vec![ArrayField::new("items", Vec::new())]);
        let expected = validate(&schema).errors;
        assert_eq!(
            FormSession::with_schema(schema).unwrap_err(),
            FormError::InvalidSchema(expected)
        );
    }

    #[test]
    fn add_then_remove_returns_to_zero_rows() {
        let mut session = invoice_session();
        assert_eq!(session.state(), SessionState::Populated);
        assert_eq!(session.row_count("items"), 0);
        assert_eq!(session.add_row("items").unwrap(), 0);
        session.remove_row("items", 0).unwrap();
        assert_eq!(session.row_count("items"), 0);
        assert_eq!(session.state(), SessionState::Editing);
    }

    #[test]
    fn new_rows_start_with_typed_defaults() {
        let mut session = invoice_session();
        session.add_row("items").unwrap();
        let row = &session.values().rows("items")[0];
        assert_eq!(row["description"], FieldValue::Text(String::new()));
        assert_eq!(row["quantity"], FieldValue::Number(0.0));
        assert_eq!(row["total"], FieldValue::Number(0.0));
    }

    #[test]
    fn removing_a_missing_row_is_reported_and_harmless() {
        let mut session = invoice_session();
        session.add_row("items").unwrap();
        let before = session.values().clone();
        assert_eq!(
            session.remove_row("items", 3),
            Err(FormError::RowOutOfRange {
                array: "items".into(),
                index: 3,
                len: 1
            })
        );
        assert_eq!(session.values(), &before);
    }

    #[test]
    fn remove_shifts_later_rows_up() {
        let mut session = invoice_session();
        for i in 0..3 {
            session.add_row("items").unwrap();
            fill_row(&mut session, i, i as f64 + 1.0, 1.0);
        }
        session.remove_row("items", 1).unwrap();
        let quantities: Vec<_> = session
            .values()
            .rows("items")
            .iter()
            .map(|r| r["quantity"].clone())
            .collect();
        assert_eq!(quantities, [FieldValue::Number(1.0), FieldValue::Number(3.0)]);
        assert_eq!(session.grand_total(), Some(4.0));
    }

    #[test]
    fn computes_line_and_grand_totals() {
        let mut session = invoice_session();
        assert!(session.has_line_totals());
        session.add_row("items").unwrap();
        fill_row(&mut session, 0, 3.0, 2.5);
        assert_eq!(session.values().rows("items")[0]["total"], FieldValue::Number(7.5));
        assert_eq!(session.grand_total(), Some(7.5));

        session.add_row("items").unwrap();
        fill_row(&mut session, 1, 4.0, 2.5);
        assert_eq!(session.values().rows("items")[1]["total"], FieldValue::Number(10.0));
        assert_eq!(session.grand_total(), Some(17.5));

        session
            .set_row_field_input("items", 1, "quantity", "oops")
            .unwrap();
        assert_eq!(session.grand_total(), Some(7.5));
    }

    #[test]
    fn totals_only_for_items_with_quantity_and_price() {
        let schema =
            schema_from_template("{{#each lines}}{{quantity}}{{unit_price}}{{/each}}").unwrap();
        let mut session = FormSession::with_schema(schema).unwrap();
        assert!(!session.has_line_totals());
        session.add_row("lines").unwrap();
        assert!(session.values().rows("lines")[0].get("total").is_none());
        assert_eq!(session.grand_total(), None);

        let schema = schema_from_template("{{#each items}}{{description}}{{quantity}}{{/each}}").unwrap();
        assert!(!FormSession::with_schema(schema).unwrap().has_line_totals());
    }

    #[test]
    fn derived_fields_are_read_only_and_mirrored() {
        let schema = schema_from_template(
            "{{grand_total}}{{#each items}}{{qty}}{{hourly_rate}}{{total}}{{/each}}",
        )
        .unwrap();
        let mut session = FormSession::with_schema(schema).unwrap();
        session.add_row("items").unwrap();
        session.set_row_field("items", 0, "qty", FieldValue::Number(2.0)).unwrap();
        session
            .set_row_field("items", 0, "hourly_rate", FieldValue::Number(30.0))
            .unwrap();
        assert_eq!(session.values().fields["grand_total"], FieldValue::Number(60.0));
        assert!(matches!(
            session.set_field("grand_total", FieldValue::Number(1.0)),
            Err(FormError::DerivedField(_))
        ));
        assert!(matches!(
            session.set_row_field("items", 0, "total", FieldValue::Number(1.0)),
            Err(FormError::DerivedField(_))
        ));
    }

    #[test]
    fn rejected_submission_keeps_values_and_reports_fields() {
        let mut session = invoice_session();
        session
            .set_field("invoice_number", FieldValue::Text("F-001".into()))
            .unwrap();
        session
            .set_field_input("invoice_date", "yesterday")
            .unwrap();
        session.add_row("items").unwrap();

        let mut received = Vec::new();
        let err = session.submit(&mut |v: SubmittedValueTree| received.push(v)).unwrap_err();
        let FormError::Rejected(errors) = err else {
            panic!("expected rejection");
        };
        let paths: Vec<_> = errors.iter().map(|e| e.path.as_str()).collect();
        assert_eq!(paths, ["invoice_date", "items[0].description"]);
        assert!(received.is_empty());
        assert_eq!(session.state(), SessionState::Editing);
        assert_eq!(
            session.values().fields["invoice_number"],
            FieldValue::Text("F-001".into())
        );
        assert_eq!(session.errors_for("invoice_date").count(), 1);

        session.set_field_input("invoice_date", "2024-05-01").unwrap();
        assert_eq!(session.errors_for("invoice_date").count(), 0);
        assert_eq!(session.errors().len(), 1);
    }

    #[test]
    fn accepted_submission_hands_off_a_copy_once() {
        let mut session = invoice_session();
        session
            .set_field("invoice_number", FieldValue::Text("F-002".into()))
            .unwrap();
        session.set_field_input("invoice_date", "2024-05-01").unwrap();
        session.add_row("items").unwrap();
        fill_row(&mut session, 0, 3.0, 2.5);

        let mut received = Vec::new();
        session.submit(&mut |v: SubmittedValueTree| received.push(v)).unwrap();
        assert_eq!(session.state(), SessionState::Submitted);
        assert_eq!(received.len(), 1);
        assert_eq!(received[0].grand_total, Some(7.5));

        assert_eq!(session.add_row("items"), Err(FormError::AlreadySubmitted));
        assert_eq!(
            session.submit(&mut |v: SubmittedValueTree| received.push(v)),
            Err(FormError::AlreadySubmitted)
        );
        assert_eq!(received.len(), 1);
    }

    #[test]
    fn restore_checks_names_and_recomputes_totals() {
        let mut session = invoice_session();
        let mut values = SubmittedValueTree::default();
        values
            .fields
            .insert("invoice_number".into(), FieldValue::Text("F-3".into()));
        let mut row = Row::new();
        row.insert("quantity".into(), FieldValue::Number(2.0));
        row.insert("unit_price".into(), FieldValue::Number(5.0));
        row.insert("total".into(), FieldValue::Number(999.0));
        values.arrays.insert("items".into(), vec![row]);

        session.restore(values.clone()).unwrap();
        assert_eq!(session.grand_total(), Some(10.0));
        assert_eq!(
            session.values().rows("items")[0]["description"],
            FieldValue::Text(String::new())
        );

        values.fields.insert("unexpected".into(), FieldValue::Number(1.0));
        assert_eq!(
            session.restore(values),
            Err(FormError::UnknownField("unexpected".into()))
        );
    }

    #[test]
    fn overflowing_totals_block_submission() {
        let mut session = invoice_session();
        session
            .set_field("invoice_number", FieldValue::Text("F-004".into()))
            .unwrap();
        session.set_field_input("invoice_date", "2024-05-01").unwrap();
        session.add_row("items").unwrap();
        fill_row(&mut session, 0, 1e200, 1e200);
        assert_eq!(session.grand_total(), Some(f64::INFINITY));

        let mut received = Vec::new();
        let err = session.submit(&mut |v: SubmittedValueTree| received.push(v)).unwrap_err();
        let FormError::Rejected(errors) = err else {
            panic!("expected rejection");
        };
        let paths: Vec<_> = errors.iter().map(|e| e.path.as_str()).collect();
        assert_eq!(paths, ["items[0].total", "grand_total"]);
        assert!(received.is_empty());
        assert_eq!(session.state(), SessionState::Editing);

        fill_row(&mut session, 0, 2.0, 3.0);
        session.submit(&mut |v: SubmittedValueTree| received.push(v)).unwrap();
        assert_eq!(received[0].grand_total, Some(6.0));
    }

    #[test]
    fn total_key_restores_only_into_computed_items() {
        let schema =
            schema_from_template("{{#each lines}}{{quantity}}{{unit_price}}{{/each}}").unwrap();
        let mut session = FormSession::with_schema(schema).unwrap();
        let mut row = Row::new();
        row.insert("quantity".into(), FieldValue::Number(1.0));
        row.insert("total".into(), FieldValue::Number(5.0));
        let mut values = SubmittedValueTree::default();
        values.arrays.insert("lines".into(), vec![row]);
        assert_eq!(
            session.restore(values),
            Err(FormError::UnknownField("lines.total".into()))
        );
        assert!(session.values().rows("lines").is_empty());
    }

    #[test]
    fn loading_a_new_schema_restarts_the_session() {
        let mut session = invoice_session();
        session.add_row("items").unwrap();
        session
            .load(schema_from_template("{{name}}").unwrap())
            .unwrap();
        assert_eq!(session.state(), SessionState::Populated);
        assert_eq!(session.row_count("items"), 0);
        assert!(session.values().fields.contains_key("name"));
    }
}
