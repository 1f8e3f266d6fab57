//! Session
//!
//! One customer's visit: greet, then keep asking what they would like to do until they leave.

use std::{
    io::{self, BufRead, Write},
    str::FromStr,
};

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::{
    checkout::Checkout,
    fixtures::Shop,
    requests::{PurchaseRequest, RequestError, RequestParser},
};

/// Errors that end a session early.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Reading from or writing to the terminal failed.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// The request parser could not be built.
    #[error(transparent)]
    Request(#[from] RequestError),
}

/// Something the customer can ask for at the prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Leave the shop.
    Nothing,

    /// List everything in stock.
    Browse,

    /// Buy one or more items.
    Purchase,
}

/// The customer typed something that isn't an [`Action`].
#[derive(Debug, Error, PartialEq, Eq)]
#[error("Not a valid action.")]
pub struct UnknownAction(pub String);

impl FromStr for Action {
    type Err = UnknownAction;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "nothing" | "n" => Ok(Action::Nothing),
            "browse" => Ok(Action::Browse),
            "purchase" => Ok(Action::Purchase),
            _ => Err(UnknownAction(s.trim().to_string())),
        }
    }
}

/// Session
#[derive(Debug)]
pub struct Session {
    shop: Shop,
    checkout: Checkout,
    parser: RequestParser,
}

impl Session {
    /// Open the shop with a cashier at the register.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Request`] if the request parser can't be built.
    pub fn new(shop: Shop, checkout: Checkout) -> Result<Self, SessionError> {
        Ok(Self {
            shop,
            checkout,
            parser: RequestParser::new()?,
        })
    }

    /// The shop and its current stock
    pub fn shop(&self) -> &Shop {
        &self.shop
    }

    /// The register serving this session
    pub fn checkout(&self) -> &Checkout {
        &self.checkout
    }

    /// Serve the customer until they choose to leave or the input ends.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Io`] if reading input or writing output fails.
    pub fn run(
        &mut self,
        input: &mut impl BufRead,
        output: &mut impl Write,
    ) -> Result<(), SessionError> {
        writeln!(
            output,
            "Hello, customer! Welcome to the {}!\n",
            self.shop.name
        )?;

        loop {
            write!(
                output,
                "Actions: [nothing/browse/purchase]\nWhat would you like to do? "
            )?;
            output.flush()?;

            let Some(line) = read_line(input)? else {
                debug!("input closed");
                break;
            };

            match line.parse::<Action>() {
                Ok(Action::Nothing) => break,
                Ok(Action::Browse) => self.browse(output)?,
                Ok(Action::Purchase) => {
                    write!(output, "What would you like to buy? ")?;
                    output.flush()?;

                    let Some(list) = read_line(input)? else {
                        debug!("input closed");
                        break;
                    };

                    self.purchase(&list, output)?;
                }
                Err(error) => {
                    debug!(action = %error.0, "unknown action");
                    writeln!(output, "{error}")?;
                }
            }
        }

        info!(
            worker = self.checkout.worker(),
            completed_sales = self.checkout.completed_sales(),
            "session ended"
        );

        Ok(())
    }

    /// Write the current stock.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Io`] if writing fails.
    pub fn browse(&self, output: &mut impl Write) -> Result<(), SessionError> {
        writeln!(output, "{}", self.shop.catalog.inventory_table())?;

        Ok(())
    }

    /// Process every request on a shopping list and write a line for each.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Io`] if writing fails.
    pub fn purchase(&mut self, list: &str, output: &mut impl Write) -> Result<(), SessionError> {
        for request in self.parser.parse(list) {
            match request {
                Ok(request) => self.sell(&request, output)?,
                Err(error) => {
                    debug!(%error, "rejected request");
                    writeln!(output, "{error}")?;
                }
            }
        }

        Ok(())
    }

    fn sell(
        &mut self,
        request: &PurchaseRequest,
        output: &mut impl Write,
    ) -> Result<(), SessionError> {
        let Some(product) = self.shop.catalog.lookup_mut(&request.key) else {
            warn!(item = %request.key, "unknown item requested");
            writeln!(output, "Sorry we're out of {}.", request.key)?;

            return Ok(());
        };

        let receipt = self.checkout.transaction(product, request.quantity);

        writeln!(output, "{}", receipt.render())?;

        Ok(())
    }
}

/// Read a line without its line ending, or `None` once the input is exhausted.
fn read_line(input: &mut impl BufRead) -> Result<Option<String>, io::Error> {
    let mut line = String::new();

    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }

    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use testresult::TestResult;

    use super::*;

    fn session() -> TestResult<Session> {
        Ok(Session::new(Shop::boutique()?, Checkout::new("Emma"))?)
    }

    fn purchase(session: &mut Session, list: &str) -> TestResult<String> {
        let mut output = Vec::new();
        session.purchase(list, &mut output)?;

        Ok(String::from_utf8(output)?)
    }

    #[test]
    fn actions_parse_case_insensitively() {
        assert_eq!("nothing".parse::<Action>(), Ok(Action::Nothing));
        assert_eq!("N".parse::<Action>(), Ok(Action::Nothing));
        assert_eq!(" Browse ".parse::<Action>(), Ok(Action::Browse));
        assert_eq!("PURCHASE".parse::<Action>(), Ok(Action::Purchase));
    }

    #[test]
    fn unknown_action_is_rejected() {
        let result = "steal".parse::<Action>();

        assert_eq!(result, Err(UnknownAction("steal".to_string())));
        assert_eq!(
            UnknownAction("steal".to_string()).to_string(),
            "Not a valid action."
        );
    }

    #[test]
    fn purchase_writes_one_line_per_request() -> TestResult {
        let mut session = session()?;

        let output = purchase(&mut session, "3 coffeecup, 8 spork, widget")?;

        assert_eq!(
            output,
            "You have purchased 3 coffeecup(s) for 42.00 SEK from Emma.\n\
             Purchase declined. We only have 5 items left.\n\
             Sorry we're out of widget.\n"
        );
        assert_eq!(session.checkout().completed_sales(), 1);

        Ok(())
    }

    #[test]
    fn purchase_reports_bad_quantities_and_carries_on() -> TestResult {
        let mut session = session()?;

        let output = purchase(&mut session, "0 plate, plate")?;

        assert_eq!(
            output,
            "Sorry, 0 is not a quantity of plate we can sell.\n\
             You have purchased 1 plate(s) for 3.00 SEK from Emma.\n"
        );

        Ok(())
    }

    #[test]
    fn browse_lists_every_product() -> TestResult {
        let session = session()?;
        let mut output = Vec::new();

        session.browse(&mut output)?;
        let output = String::from_utf8(output)?;

        for label in ["coffeecup", "plate", "spork", "(20%) vase", "(50%) lavalamp"] {
            assert!(output.contains(label), "missing {label} in:\n{output}");
        }

        Ok(())
    }

    #[test]
    fn run_stops_at_end_of_input() -> TestResult {
        let mut session = session()?;
        let mut input = Cursor::new("purchase\n");
        let mut output = Vec::new();

        session.run(&mut input, &mut output)?;
        let output = String::from_utf8(output)?;

        assert!(output.ends_with("What would you like to buy? "), "{output}");

        Ok(())
    }

    #[test]
    fn read_line_strips_line_endings() -> TestResult {
        let mut input = Cursor::new("browse\r\nnothing");

        assert_eq!(read_line(&mut input)?.as_deref(), Some("browse"));
        assert_eq!(read_line(&mut input)?.as_deref(), Some("nothing"));
        assert_eq!(read_line(&mut input)?, None);

        Ok(())
    }
}
