use crate::core::{Clock, Page, SubmitEvent, SubmitHandler};
use crate::domain::model::{FormKind, SubmitOutcome, YearPolicy};
use chrono::Datelike;
use std::sync::Arc;

pub const BAND_NAME_REQUIRED: &str = "Band name is required!";
pub const INVALID_FORMED_YEAR: &str = "Please enter a valid Formed Year.";
pub const ALBUM_TITLE_REQUIRED: &str = "Please identify the album released!";
pub const INVALID_RELEASE_YEAR: &str = "Put a Valid year in.";
pub const MEMBER_NAME_REQUIRED: &str = "Member name is required!";

const EARLIEST_FORMED_YEAR: i32 = 1900;
const EARLIEST_RELEASE_YEAR: i32 = 100;

/// Local wall-clock year.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn current_year(&self) -> i32 {
        chrono::Local::now().year()
    }
}

/// Pins the current year, for tests and reproducible CLI runs.
#[derive(Debug, Clone, Copy)]
pub struct FixedYear(pub i32);

impl Clock for FixedYear {
    fn current_year(&self) -> i32 {
        self.0
    }
}

/// Client-side checks for the band, album and member forms.
pub struct FormValidator {
    policy: YearPolicy,
    clock: Arc<dyn Clock>,
}

impl FormValidator {
    pub fn new(policy: YearPolicy) -> Self {
        Self::with_clock(policy, Arc::new(SystemClock))
    }

    pub fn with_clock(policy: YearPolicy, clock: Arc<dyn Clock>) -> Self {
        Self { policy, clock }
    }

    pub fn policy(&self) -> YearPolicy {
        self.policy
    }

    /// Runs the rules for `kind` against the event's fields. The first
    /// failing rule decides the message.
    pub fn validate(&self, kind: FormKind, event: &SubmitEvent<'_>) -> SubmitOutcome {
        let current_year = self.clock.current_year();

        match kind {
            FormKind::Band => {
                if event.field("bandname").is_empty() {
                    return SubmitOutcome::blocked(BAND_NAME_REQUIRED);
                }
                let formed = event.field("formedyear");
                if !formed.is_empty()
                    && !year_in_range(formed, EARLIEST_FORMED_YEAR, current_year, self.policy)
                {
                    return SubmitOutcome::blocked(INVALID_FORMED_YEAR);
                }
            }
            FormKind::Album => {
                if event.field("albumtitle").is_empty() {
                    return SubmitOutcome::blocked(ALBUM_TITLE_REQUIRED);
                }
                let released = event.field("releaseyear");
                if !released.is_empty()
                    && !year_in_range(released, EARLIEST_RELEASE_YEAR, current_year, self.policy)
                {
                    return SubmitOutcome::blocked(INVALID_RELEASE_YEAR);
                }
            }
            FormKind::Member => {
                if event.field("membername").is_empty() {
                    return SubmitOutcome::blocked(MEMBER_NAME_REQUIRED);
                }
            }
        }

        SubmitOutcome::Proceed
    }

    /// Builds the submit listener for one form: alert and cancel on failure.
    pub fn handler(self: &Arc<Self>, kind: FormKind) -> SubmitHandler {
        let validator = Arc::clone(self);
        Box::new(move |event: &mut SubmitEvent<'_>| {
            if let SubmitOutcome::Blocked { message } = validator.validate(kind, event) {
                tracing::debug!("Blocked submission of {}: {}", kind.form_id(), message);
                event.alert(message);
                event.prevent_default();
            }
        })
    }

    /// Attaches a listener to every validated form mounted on `page` and
    /// returns the kinds that were bound.
    pub fn bind(self: &Arc<Self>, page: &mut dyn Page) -> Vec<FormKind> {
        let mut bound = Vec::new();
        for kind in FormKind::ALL {
            if let Some(form) = page.form_mut(kind.form_id()) {
                form.add_submit_listener(self.handler(kind));
                bound.push(kind);
            }
        }
        tracing::debug!("Validation bound to {} form(s)", bound.len());
        bound
    }
}

fn year_in_range(raw: &str, min: i32, max: i32, policy: YearPolicy) -> bool {
    match policy {
        YearPolicy::Strict => raw
            .parse::<i32>()
            .map(|year| (min..=max).contains(&year))
            .unwrap_or(false),
        YearPolicy::Lenient => {
            let year = js_number(raw);
            // NaN 無法比較，沿用舊行為直接放行
            year.is_nan() || (year >= f64::from(min) && year <= f64::from(max))
        }
    }
}

/// String-to-number conversion with browser `Number()` rules, for already
/// trimmed, non-empty input. Anything it does not recognise is NaN.
fn js_number(raw: &str) -> f64 {
    match raw {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }

    let radix = match raw.get(..2) {
        Some("0x" | "0X") => Some(16),
        Some("0o" | "0O") => Some(8),
        Some("0b" | "0B") => Some(2),
        _ => None,
    };
    if let Some(radix) = radix {
        let digits = &raw[2..];
        if digits.is_empty() {
            return f64::NAN;
        }
        return digits.chars().try_fold(0.0_f64, |acc, c| {
            c.to_digit(radix).map(|d| acc * f64::from(radix) + f64::from(d))
        })
        .unwrap_or(f64::NAN);
    }

    if is_decimal_literal(raw) {
        raw.parse::<f64>().unwrap_or(f64::NAN)
    } else {
        f64::NAN
    }
}

/// `[+-] digits [. digits] [(e|E) [+-] digits]`, with at least one mantissa
/// digit on either side of the point.
fn is_decimal_literal(raw: &str) -> bool {
    let body = raw.strip_prefix(&['+', '-'][..]).unwrap_or(raw);
    let (mantissa, exponent) = match body.find(&['e', 'E'][..]) {
        Some(at) => (&body[..at], Some(&body[at + 1..])),
        None => (body, None),
    };

    let (int_part, frac_part) = mantissa.split_once('.').unwrap_or((mantissa, ""));
    let all_digits = |s: &str| s.chars().all(|c| c.is_ascii_digit());
    let mantissa_ok = all_digits(int_part)
        && all_digits(frac_part)
        && !(int_part.is_empty() && frac_part.is_empty());

    let exponent_ok = match exponent {
        None => true,
        Some(exp) => {
            let digits = exp.strip_prefix(&['+', '-'][..]).unwrap_or(exp);
            !digits.is_empty() && all_digits(digits)
        }
    };

    mantissa_ok && exponent_ok
}
