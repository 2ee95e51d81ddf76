//! Checkout Session
//!
//! The console side of the calculator: prompts for rules and baskets,
//! re-prompting until the input validates, then prints the rule table and
//! checkout total. Input and output are injected so a session can run over
//! stdin/stdout or over in-memory buffers.

use std::io::{self, BufRead, Write};

use rust_decimal::Decimal;
use rusty_money::iso::Currency;
use thiserror::Error;
use tracing::{debug, info};

use crate::{
    basket::{is_valid_basket, parse_basket},
    pricing::{PricingError, calculate_total},
    receipt::{ReceiptError, checkout_summary, format_total, write_rules_table},
    rules::{
        PricingRules,
        parser::{RuleParseError, parse_rules, split_rows},
        validation::is_valid_rules,
    },
    utils::is_blank,
};

const RULES_PROMPT: &str = "Enter the pricing rules as <SKU>,<unit price>[,<qty> for <price>] separated by ';'\n\
    e.g. A,50,3 for 130;B,30,2 for 45;C,20";

const BASKET_PROMPT: &str =
    "Enter the basket as a run of SKUs, e.g. ABBABBA. Every SKU must have a pricing rule.";

const CONTINUE_PROMPT: &str = "Start a new transaction? Answer Y or N:";

const CONTINUE_RETRY_PROMPT: &str = "Incorrect input, please answer Y or N:";

/// Errors that end a checkout session.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Reading input or writing a prompt failed.
    #[error("console IO failed: {0}")]
    Io(#[from] io::Error),

    /// Input ended while waiting for an answer.
    #[error("input closed before an answer was given")]
    InputClosed,

    /// Rule text passed validation but could not be parsed.
    #[error(transparent)]
    RuleParse(#[from] RuleParseError),

    /// The basket total could not be represented.
    #[error(transparent)]
    Pricing(#[from] PricingError),

    /// The rule table or total could not be written.
    #[error(transparent)]
    Receipt(#[from] ReceiptError),
}

/// Whether `answer` is a `Y` or `N` reply, ignoring surrounding whitespace.
pub fn is_valid_continue(answer: &str) -> bool {
    !is_blank(answer) && matches!(answer.trim(), "Y" | "N")
}

/// A console checkout session over a line reader and a writer.
#[derive(Debug)]
pub struct CheckoutSession<R, W> {
    input: R,
    output: W,
    currency: &'static Currency,
}

impl<R: BufRead, W: Write> CheckoutSession<R, W> {
    /// Create a session reading answers from `input` and writing prompts to `output`.
    pub fn new(input: R, output: W, currency: &'static Currency) -> Self {
        Self {
            input,
            output,
            currency,
        }
    }

    /// Run checkouts until the user declines a new transaction.
    ///
    /// # Errors
    ///
    /// Returns a [`SessionError`] if input ends, IO fails, validated rule
    /// text cannot be parsed or the total overflows.
    pub fn run(&mut self) -> Result<(), SessionError> {
        loop {
            self.checkout()?;

            if !self.start_new_transaction()? {
                return Ok(());
            }
        }
    }

    /// Run a single checkout: rules, rule table, basket, total.
    ///
    /// # Errors
    ///
    /// Returns a [`SessionError`] if input ends, IO fails, validated rule
    /// text cannot be parsed or the total overflows.
    pub fn checkout(&mut self) -> Result<Decimal, SessionError> {
        let raw_rules = self.load_pricing_rules()?;
        let rules = parse_rules(split_rows(&raw_rules))?;

        write_rules_table(&mut self.output, &rules)?;

        let basket = self.load_basket(&rules)?;
        let total = calculate_total(&parse_basket(&basket), &rules)?;
        let formatted = format_total(total, self.currency);

        writeln!(self.output, "{}", checkout_summary(&basket, &formatted))?;

        info!(basket = %basket, total = %formatted, "checkout complete");

        Ok(total)
    }

    /// Prompt for rule text until it validates.
    ///
    /// # Errors
    ///
    /// Returns a [`SessionError`] if input ends or IO fails.
    pub fn load_pricing_rules(&mut self) -> Result<String, SessionError> {
        self.prompt_until(RULES_PROMPT, is_valid_rules)
    }

    /// Prompt for a basket until every item in it has a rule in `rules`.
    ///
    /// # Errors
    ///
    /// Returns a [`SessionError`] if input ends or IO fails.
    pub fn load_basket(&mut self, rules: &PricingRules) -> Result<String, SessionError> {
        self.prompt_until(BASKET_PROMPT, |basket| is_valid_basket(basket, rules))
    }

    /// Ask whether to start another transaction, re-asking until the answer
    /// is `Y` or `N`.
    ///
    /// # Errors
    ///
    /// Returns a [`SessionError`] if input ends or IO fails.
    pub fn start_new_transaction(&mut self) -> Result<bool, SessionError> {
        writeln!(self.output, "{CONTINUE_PROMPT}")?;

        let mut answer = self.read_answer()?;

        while !is_valid_continue(&answer) {
            writeln!(self.output, "{CONTINUE_RETRY_PROMPT}")?;
            answer = self.read_answer()?;
        }

        Ok(answer.trim() == "Y")
    }

    /// Consume the session, returning its reader and writer.
    pub fn into_parts(self) -> (R, W) {
        (self.input, self.output)
    }

    fn prompt_until(
        &mut self,
        prompt: &str,
        mut is_valid: impl FnMut(&str) -> bool,
    ) -> Result<String, SessionError> {
        loop {
            writeln!(self.output, "{prompt}")?;

            let line = self.read_line()?;

            if is_valid(&line) {
                return Ok(line);
            }

            debug!(input = %line, "rejected input, prompting again");
        }
    }

    /// Next line that is not blank; blank lines are skipped silently.
    fn read_answer(&mut self) -> Result<String, SessionError> {
        loop {
            let line = self.read_line()?;

            if !is_blank(&line) {
                return Ok(line);
            }
        }
    }

    fn read_line(&mut self) -> Result<String, SessionError> {
        self.output.flush()?;

        let mut line = String::new();

        if self.input.read_line(&mut line)? == 0 {
            return Err(SessionError::InputClosed);
        }

        let trimmed_len = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed_len);

        Ok(line)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use rusty_money::iso;
    use testresult::TestResult;

    use super::*;

    fn session(input: &str) -> CheckoutSession<Cursor<Vec<u8>>, Vec<u8>> {
        CheckoutSession::new(Cursor::new(input.as_bytes().to_vec()), Vec::new(), iso::GBP)
    }

    fn output(session: CheckoutSession<Cursor<Vec<u8>>, Vec<u8>>) -> Result<String, SessionError> {
        let (_, out) = session.into_parts();

        String::from_utf8(out).map_err(|err| SessionError::Io(io::Error::other(err)))
    }

    #[test]
    fn continue_answers() {
        assert!(is_valid_continue("Y"));
        assert!(is_valid_continue(" N \n"));
        assert!(!is_valid_continue("y"));
        assert!(!is_valid_continue("YES"));
        assert!(!is_valid_continue(""));
        assert!(!is_valid_continue("  "));
    }

    #[test]
    fn load_pricing_rules_reprompts_until_valid() -> TestResult {
        let mut session = session("A50\nA,50;A,30\nA,50,3 for 130;B,30\n");

        let rules = session.load_pricing_rules()?;

        assert_eq!(rules, "A,50,3 for 130;B,30");

        let out = output(session)?;
        assert_eq!(out.matches(RULES_PROMPT).count(), 3);

        Ok(())
    }

    #[test]
    fn load_basket_reprompts_until_items_are_known() -> TestResult {
        let rules = parse_rules(["A,50", "B,30"])?;
        let mut session = session("CDB\n\nABBA\r\n");

        let basket = session.load_basket(&rules)?;

        assert_eq!(basket, "ABBA");

        Ok(())
    }

    #[test]
    fn start_new_transaction_reasks_until_y_or_n() -> TestResult {
        let mut session = session("maybe\ny\nY\n");

        assert!(session.start_new_transaction()?);

        let out = output(session)?;
        assert_eq!(out.matches(CONTINUE_RETRY_PROMPT).count(), 2);

        Ok(())
    }

    #[test]
    fn start_new_transaction_skips_blank_lines() -> TestResult {
        let mut session = session("\n   \nN\n");

        assert!(!session.start_new_transaction()?);

        let out = output(session)?;
        assert!(
            !out.contains(CONTINUE_RETRY_PROMPT),
            "blank lines should not be answered with a retry prompt"
        );

        Ok(())
    }

    #[test]
    fn start_new_transaction_declined() -> TestResult {
        let mut session = session("N\n");

        assert!(!session.start_new_transaction()?);

        Ok(())
    }

    #[test]
    fn closed_input_ends_session() {
        let mut session = session("");

        assert!(matches!(
            session.load_pricing_rules(),
            Err(SessionError::InputClosed)
        ));
    }

    #[test]
    fn checkout_prints_table_and_total() -> TestResult {
        let mut session = session("A,50,3 for 130;B,30,2 for 45\nAAAABBB\n");

        let total = session.checkout()?;

        assert_eq!(total, Decimal::from(255));

        let out = output(session)?;
        assert!(out.contains("3 for 130"), "rule table should be printed");
        assert!(
            out.contains("The checkout total for the basket AAAABBB is: £255.00"),
            "summary should be printed, got: {out}"
        );

        Ok(())
    }

    #[test]
    fn malformed_numbers_past_validation_fail_the_checkout() {
        let mut session = session("A,fifty\n");

        assert!(matches!(
            session.checkout(),
            Err(SessionError::RuleParse(RuleParseError::InvalidUnitPrice(..)))
        ));
    }

    #[test]
    fn overflowing_total_fails_the_checkout() {
        let mut session = session("A,79228162514264337593543950335\nAA\n");

        assert!(matches!(
            session.checkout(),
            Err(SessionError::Pricing(PricingError::Overflow(item))) if item == "A"
        ));
    }
}
