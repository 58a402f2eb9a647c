//! Scripted storefront sessions.
//!
//! # Usage
//!
//! ```bash
//! cylo run session.cylo
//! cylo run < session.cylo
//! ```
//!
//! # Script Format
//!
//! One command per line. Blank lines and lines starting with `#` are skipped.
//!
//! ```text
//! login ada@cylo.example     # sign in (the authentication step is simulated)
//! logout
//! add <product> [qty]        # qty defaults to 1
//! remove <product>
//! set <product> <qty>        # 0 removes the line
//! wish <product>
//! unwish <product>
//! search <text...>           # submit the header search box
//! category <women|men|none>
//! go <path>
//! back
//! header                     # print the rendered header
//! state                      # print cart, wishlist, session and filters
//! ```
//!
//! A malformed line stops the script. A rejected operation, such as adding
//! past the per-line maximum, is logged and the script carries on.

use std::cell::Cell;
use std::fmt::Write as _;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::Path;
use std::rc::Rc;

use thiserror::Error;

use cylo_core::{Category, Email, ProductId, Quantity, QuantityError, UserId};
use cylo_storefront::config::StorefrontConfig;
use cylo_storefront::header::{Header, HeaderView};
use cylo_storefront::persistence::{JsonFileStore, StoreError};
use cylo_storefront::routes::{Navigation, Outcome};
use cylo_storefront::state::{FilterPatch, FilterState, Identity};
use cylo_storefront::{AppError, Storefront};

/// A script line that could not be understood.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("unknown command `{0}`")]
    UnknownCommand(String),

    #[error("usage: {0}")]
    Usage(&'static str),

    #[error(transparent)]
    Invalid(#[from] AppError),
}

/// Errors that stop a script run.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("line {line}: {source}")]
    Parse {
        line: usize,
        #[source]
        source: ParseError,
    },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error(transparent)]
    App(#[from] AppError),
}

/// One parsed script command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptCommand {
    Login(Email),
    Logout,
    Add {
        product_id: ProductId,
        quantity: Quantity,
    },
    Remove(ProductId),
    Set {
        product_id: ProductId,
        quantity: u32,
    },
    Wish(ProductId),
    Unwish(ProductId),
    Search(String),
    Category(Option<Category>),
    Go(String),
    Back,
    Header,
    State,
}

fn product(raw: Option<&str>, usage: &'static str) -> Result<ProductId, ParseError> {
    let raw = raw.ok_or(ParseError::Usage(usage))?;
    Ok(ProductId::parse(raw).map_err(AppError::from)?)
}

fn no_more<'a>(mut args: impl Iterator<Item = &'a str>, usage: &'static str) -> Result<(), ParseError> {
    match args.next() {
        Some(_) => Err(ParseError::Usage(usage)),
        None => Ok(()),
    }
}

/// Parse one script line. Returns `None` for blank lines and comments.
///
/// # Errors
///
/// Returns `ParseError` for unknown commands, missing or extra arguments,
/// and arguments that fail validation.
pub fn parse_line(line: &str) -> Result<Option<ScriptCommand>, ParseError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let (name, rest) = line
        .split_once(char::is_whitespace)
        .map_or((line, ""), |(name, rest)| (name, rest.trim()));
    let mut args = rest.split_whitespace();

    let command = match name {
        "login" => {
            const USAGE: &str = "login <email>";
            let raw = args.next().ok_or(ParseError::Usage(USAGE))?;
            no_more(args, USAGE)?;
            ScriptCommand::Login(Email::parse(raw).map_err(AppError::from)?)
        }
        "logout" => {
            no_more(args, "logout")?;
            ScriptCommand::Logout
        }
        "add" => {
            const USAGE: &str = "add <product> [qty]";
            let product_id = product(args.next(), USAGE)?;
            let quantity = match args.next() {
                Some(raw) => raw.parse::<Quantity>().map_err(AppError::from)?,
                None => Quantity::ONE,
            };
            no_more(args, USAGE)?;
            ScriptCommand::Add {
                product_id,
                quantity,
            }
        }
        "remove" => {
            const USAGE: &str = "remove <product>";
            let product_id = product(args.next(), USAGE)?;
            no_more(args, USAGE)?;
            ScriptCommand::Remove(product_id)
        }
        "set" => {
            const USAGE: &str = "set <product> <qty>";
            let product_id = product(args.next(), USAGE)?;
            let raw = args.next().ok_or(ParseError::Usage(USAGE))?;
            let quantity = raw
                .parse::<u32>()
                .map_err(|_| AppError::from(QuantityError::NotAWholeNumber(raw.to_string())))?;
            no_more(args, USAGE)?;
            ScriptCommand::Set {
                product_id,
                quantity,
            }
        }
        "wish" => {
            const USAGE: &str = "wish <product>";
            let product_id = product(args.next(), USAGE)?;
            no_more(args, USAGE)?;
            ScriptCommand::Wish(product_id)
        }
        "unwish" => {
            const USAGE: &str = "unwish <product>";
            let product_id = product(args.next(), USAGE)?;
            no_more(args, USAGE)?;
            ScriptCommand::Unwish(product_id)
        }
        // Everything after the command word is the query, including nothing.
        "search" => ScriptCommand::Search(rest.split_whitespace().collect::<Vec<_>>().join(" ")),
        "category" => {
            const USAGE: &str = "category <women|men|none>";
            let raw = args.next().ok_or(ParseError::Usage(USAGE))?;
            no_more(args, USAGE)?;
            if raw.eq_ignore_ascii_case("none") {
                ScriptCommand::Category(None)
            } else {
                ScriptCommand::Category(Some(raw.parse::<Category>().map_err(AppError::from)?))
            }
        }
        "go" => {
            const USAGE: &str = "go <path>";
            let path = args.next().ok_or(ParseError::Usage(USAGE))?;
            no_more(args, USAGE)?;
            ScriptCommand::Go(path.to_string())
        }
        "back" => {
            no_more(args, "back")?;
            ScriptCommand::Back
        }
        "header" => {
            no_more(args, "header")?;
            ScriptCommand::Header
        }
        "state" => {
            no_more(args, "state")?;
            ScriptCommand::State
        }
        other => return Err(ParseError::UnknownCommand(other.to_string())),
    };

    Ok(Some(command))
}

/// Counts reported at the end of a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub executed: usize,
    pub rejected: usize,
}

/// A storefront plus the header UI state a shopper interacts with.
#[derive(Debug)]
pub struct Session {
    app: Storefront,
    header: Header,
    next_user_id: u64,
    changed: Rc<Cell<bool>>,
}

impl Session {
    /// Wrap a storefront, watching the persisted containers for changes.
    #[must_use]
    pub fn new(app: Storefront) -> Self {
        let next_user_id = app.session().read(|session| {
            session
                .current()
                .map_or(1, |identity| identity.id.as_u64().saturating_add(1))
        });

        let changed = Rc::new(Cell::new(false));
        let flag = Rc::clone(&changed);
        app.session().subscribe(move |_| flag.set(true));
        let flag = Rc::clone(&changed);
        app.cart().subscribe(move |_| flag.set(true));
        let flag = Rc::clone(&changed);
        app.wishlist().subscribe(move |_| flag.set(true));

        Self {
            app,
            header: Header::default(),
            next_user_id,
            changed,
        }
    }

    #[must_use]
    pub const fn app(&self) -> &Storefront {
        &self.app
    }

    /// Whether the session, cart or wishlist changed since [`Self::new`].
    #[must_use]
    pub fn has_changes(&self) -> bool {
        self.changed.get()
    }

    /// Apply one command. Returns text to print, if any.
    ///
    /// # Errors
    ///
    /// Returns `AppError` if the storefront rejects the operation.
    pub fn apply(&mut self, command: ScriptCommand) -> Result<Option<String>, AppError> {
        match command {
            ScriptCommand::Login(email) => {
                let id = UserId::new(self.next_user_id);
                self.next_user_id = self.next_user_id.saturating_add(1);
                self.app.sign_in(Identity::new(id, email));
            }
            ScriptCommand::Logout => {
                self.app.sign_out();
            }
            ScriptCommand::Add {
                product_id,
                quantity,
            } => {
                self.app.add_to_cart(product_id, quantity)?;
            }
            ScriptCommand::Remove(product_id) => {
                self.app.remove_from_cart(&product_id);
            }
            ScriptCommand::Set {
                product_id,
                quantity,
            } => {
                self.app.set_cart_quantity(&product_id, quantity)?;
            }
            ScriptCommand::Wish(product_id) => {
                self.app.add_to_wishlist(product_id);
            }
            ScriptCommand::Unwish(product_id) => {
                self.app.remove_from_wishlist(&product_id);
            }
            ScriptCommand::Search(query) => {
                self.header.open_search();
                self.header.set_search_input(query);
                log_navigation(&self.header.submit_search(&self.app));
            }
            ScriptCommand::Category(category) => {
                self.app.patch_filters(FilterPatch::category(category));
            }
            ScriptCommand::Go(path) => {
                log_navigation(&self.header.follow_link(&self.app, &path));
            }
            ScriptCommand::Back => match self.app.back() {
                Some(navigation) => log_navigation(&navigation),
                None => tracing::info!("No history to go back to"),
            },
            ScriptCommand::Header => return Ok(Some(format_header(&self.header.render(&self.app)))),
            ScriptCommand::State => return self.state_json().map(Some),
        }
        Ok(None)
    }

    fn state_json(&self) -> Result<String, AppError> {
        let value = serde_json::json!({
            "location": self.app.current_path(),
            "snapshot": self.app.snapshot(),
            "filters": self.app.filters().read(FilterState::read),
        });
        Ok(serde_json::to_string_pretty(&value).map_err(StoreError::from)?)
    }
}

fn log_navigation(navigation: &Navigation) {
    match &navigation.outcome {
        Outcome::Rendered(view) => {
            tracing::info!(location = %navigation.location, ?view, "Rendered");
        }
        Outcome::Redirected { from, to } => {
            tracing::info!(%from, %to, "Redirected");
        }
        Outcome::NotFound => {
            tracing::warn!(location = %navigation.location, "No route matches");
        }
    }
}

/// Render a header view as one line of text.
#[must_use]
pub fn format_header(view: &HeaderView) -> String {
    let mut line = view.brand.label.to_string();
    for link in &view.nav {
        if link.active {
            let _ = write!(line, "  [{}]", link.label);
        } else {
            let _ = write!(line, "  {}", link.label);
        }
    }
    if let Some(count) = view.wishlist_badge {
        let _ = write!(line, "  wishlist({count})");
    }
    if let Some(count) = view.cart_badge {
        let _ = write!(line, "  cart({count})");
    }
    let _ = write!(line, "  account -> {}", view.account_path);
    line
}

/// Run every line of `reader` against `session`, writing output to `out`.
///
/// # Errors
///
/// Returns `RunError::Parse` on the first malformed line, or an I/O error.
pub fn run_script(
    reader: impl BufRead,
    session: &mut Session,
    out: &mut impl Write,
) -> Result<Summary, RunError> {
    let mut summary = Summary::default();

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let command = parse_line(&line).map_err(|source| RunError::Parse {
            line: index + 1,
            source,
        })?;
        let Some(command) = command else {
            continue;
        };

        tracing::debug!(line = index + 1, ?command, "Executing");
        match session.apply(command) {
            Ok(Some(text)) => writeln!(out, "{text}")?,
            Ok(None) => {}
            Err(e) => {
                e.report();
                summary.rejected += 1;
            }
        }
        summary.executed += 1;
    }

    Ok(summary)
}

/// Entry point for `cylo run`.
///
/// # Errors
///
/// Returns an error if the script cannot be read or parsed, or if the state
/// file cannot be loaded or saved.
pub fn execute(
    config: &StorefrontConfig,
    script: Option<&Path>,
    save: bool,
) -> Result<Summary, RunError> {
    let app = Storefront::from_config(config);
    let store = config.state_file.as_ref().map(JsonFileStore::new);

    if let Some(store) = &store {
        tracing::info!(path = %store.path().display(), "Loading storefront state");
        app.load_from(store)?;
        app.refresh();
    }

    let mut session = Session::new(app);
    let mut stdout = io::stdout().lock();
    let summary = match script {
        Some(path) => run_script(BufReader::new(File::open(path)?), &mut session, &mut stdout)?,
        None => run_script(io::stdin().lock(), &mut session, &mut stdout)?,
    };

    if let Some(store) = store.filter(|_| save) {
        if session.has_changes() {
            session.app().save_to(&store)?;
            tracing::info!(path = %store.path().display(), "Saved storefront state");
        } else {
            tracing::debug!("Storefront state unchanged, not saving");
        }
    }

    Ok(summary)
}
