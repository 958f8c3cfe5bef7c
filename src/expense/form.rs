//! The form for adding or editing an expense.

use std::str::FromStr;

use maud::{Markup, html};
use serde::Deserialize;
use time::{Date, macros::format_description};

use crate::{
    Error,
    amount::Amount,
    expense::{Expense, NewExpense},
    html::{FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE},
};

/// The form data for creating or replacing an expense.
///
/// Fields are taken as text so that bad input is reported as a validation
/// error rather than rejected by the extractor.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExpenseForm {
    /// What the money was spent on.
    pub name: String,
    /// The amount in dollars, e.g. "12.30".
    pub amount: String,
    /// The date in the format YYYY-MM-DD.
    pub date: String,
    /// The category label, e.g. "Groceries".
    pub category: String,
}

impl ExpenseForm {
    /// Validate the form.
    ///
    /// # Errors
    /// Returns [Error::InvalidAmount], [Error::InvalidDate], [Error::EmptyExpenseName]
    /// or [Error::EmptyCategory] if a field is invalid.
    pub fn to_new_expense(&self) -> Result<NewExpense, Error> {
        let amount = Amount::from_str(&self.amount)?;
        let date = parse_date(&self.date)?;

        NewExpense::new(&self.name, amount, date, &self.category)
    }
}

fn parse_date(text: &str) -> Result<Date, Error> {
    Date::parse(text.trim(), format_description!("[year]-[month]-[day]"))
        .map_err(|_| Error::InvalidDate(text.to_owned()))
}

/// The values to prefill the form with.
pub(crate) struct ExpenseFormDefaults<'a> {
    pub name: Option<&'a str>,
    pub amount: Option<Amount>,
    pub date: Date,
    pub category: Option<&'a str>,
}

impl<'a> ExpenseFormDefaults<'a> {
    /// Defaults for a blank form dated `today`.
    pub fn blank(today: Date) -> Self {
        Self {
            name: None,
            amount: None,
            date: today,
            category: None,
        }
    }

    /// Defaults taken from an existing expense.
    pub fn from_expense(expense: &'a Expense) -> Self {
        Self {
            name: Some(&expense.name),
            amount: Some(expense.amount),
            date: expense.date,
            category: Some(&expense.category),
        }
    }
}

pub(crate) fn expense_form_fields(defaults: &ExpenseFormDefaults<'_>) -> Markup {
    let amount = defaults.amount.map(|amount| amount.to_string());

    html! {
        div
        {
            label for="name" class=(FORM_LABEL_STYLE) { "Name" }

            input
                name="name"
                id="name"
                type="text"
                placeholder="Groceries at the market"
                value=[defaults.name]
                required
                autofocus
                class=(FORM_TEXT_INPUT_STYLE);
        }

        div
        {
            label for="amount" class=(FORM_LABEL_STYLE) { "Amount" }

            div class="input-wrapper w-full"
            {
                input
                    name="amount"
                    id="amount"
                    type="number"
                    step="any"
                    placeholder="0.00"
                    value=[amount.as_deref()]
                    required
                    class=(FORM_TEXT_INPUT_STYLE);
            }
        }

        div
        {
            label for="date" class=(FORM_LABEL_STYLE) { "Date" }

            input
                name="date"
                id="date"
                type="date"
                value=(defaults.date)
                required
                class=(FORM_TEXT_INPUT_STYLE);
        }

        div
        {
            label for="category" class=(FORM_LABEL_STYLE) { "Category" }

            input
                name="category"
                id="category"
                type="text"
                placeholder="Groceries"
                value=[defaults.category]
                required
                class=(FORM_TEXT_INPUT_STYLE);
        }
    }
}
