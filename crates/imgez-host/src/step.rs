//! Parsing of batch edit steps for the command line front end.
//!
//! Each step is a short token such as `select=0.1,0.1,0.9,0.9`, `crop`,
//! `rotate=90` or `undo`. Selection corners are relative to the image,
//! `0.0` to `1.0` on each axis.

use std::fmt;
use std::str::FromStr;

use imgez_core::{ClipboardSink, RelPoint};
use thiserror::Error;

use crate::command::{Command, Session};
use crate::status::{messages, warning_for, Status};

#[derive(Debug, Error, PartialEq)]
pub enum StepParseError {
    #[error("unknown step: {0}")]
    UnknownStep(String),
    #[error("step `{0}` needs a value")]
    MissingValue(&'static str),
    #[error("step `{0}` takes no value")]
    UnexpectedValue(&'static str),
    #[error("expected four comma separated numbers, got `{0}`")]
    InvalidCorners(String),
    #[error("invalid angle: {0}")]
    InvalidAngle(String),
}

/// One edit in a batch run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Step {
    Select(RelPoint, RelPoint),
    /// Crop, optionally selecting first.
    Crop(Option<(RelPoint, RelPoint)>),
    Rotate(f64),
    Undo,
    Reset,
    Clear,
    Copy,
}

impl Step {
    /// Run the step against `session`.
    pub fn apply<C: ClipboardSink>(&self, session: &mut Session<C>) -> Status {
        match *self {
            Step::Select(start, end) => select(session, start, end),
            Step::Crop(corners) => {
                if let Some((start, end)) = corners {
                    let status = select(session, start, end);
                    if status.is_warning() {
                        return status;
                    }
                }
                session.execute(Command::Crop)
            }
            Step::Rotate(angle) => session.execute(Command::Rotate(angle)),
            Step::Undo => session.execute(Command::Undo),
            Step::Reset => session.execute(Command::Reset),
            Step::Clear => session.execute(Command::ClearSelection),
            Step::Copy => session.execute(Command::Copy),
        }
    }
}

fn select<C: ClipboardSink>(
    session: &mut Session<C>,
    start: RelPoint,
    end: RelPoint,
) -> Status {
    match session.engine_mut().select_relative(start, end) {
        Ok(()) => Status::info(session.readout_text()),
        Err(e) => warning_for(&e, messages::NO_IMAGE),
    }
}

fn parse_corners(value: &str) -> Result<(RelPoint, RelPoint), StepParseError> {
    let invalid = || StepParseError::InvalidCorners(value.to_string());
    let numbers = value
        .split(',')
        .map(|part| part.trim().parse::<f64>().map_err(|_| invalid()))
        .collect::<Result<Vec<_>, _>>()?;
    match numbers[..] {
        [x0, y0, x1, y1] if numbers.iter().all(|n| n.is_finite()) => {
            Ok((RelPoint::new(x0, y0), RelPoint::new(x1, y1)))
        }
        _ => Err(invalid()),
    }
}

impl FromStr for Step {
    type Err = StepParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, value) = match s.split_once('=') {
            Some((name, value)) => (name.trim(), Some(value.trim())),
            None => (s.trim(), None),
        };

        let no_value = |step: Step, label: &'static str| match value {
            None => Ok(step),
            Some(_) => Err(StepParseError::UnexpectedValue(label)),
        };

        match name.to_ascii_lowercase().as_str() {
            "select" => {
                let value = value.ok_or(StepParseError::MissingValue("select"))?;
                let (start, end) = parse_corners(value)?;
                Ok(Step::Select(start, end))
            }
            "crop" => match value {
                Some(value) => Ok(Step::Crop(Some(parse_corners(value)?))),
                None => Ok(Step::Crop(None)),
            },
            "rotate" => {
                let value = value.ok_or(StepParseError::MissingValue("rotate"))?;
                let angle: f64 = value
                    .parse()
                    .map_err(|_| StepParseError::InvalidAngle(value.to_string()))?;
                if !angle.is_finite() {
                    return Err(StepParseError::InvalidAngle(value.to_string()));
                }
                Ok(Step::Rotate(angle))
            }
            "undo" => no_value(Step::Undo, "undo"),
            "reset" => no_value(Step::Reset, "reset"),
            "clear" => no_value(Step::Clear, "clear"),
            "copy" => no_value(Step::Copy, "copy"),
            _ => Err(StepParseError::UnknownStep(s.to_string())),
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let corners = |f: &mut fmt::Formatter<'_>, a: RelPoint, b: RelPoint| {
            write!(f, "{},{},{},{}", a.x, a.y, b.x, b.y)
        };
        match *self {
            Step::Select(a, b) => {
                f.write_str("select=")?;
                corners(f, a, b)
            }
            Step::Crop(Some((a, b))) => {
                f.write_str("crop=")?;
                corners(f, a, b)
            }
            Step::Crop(None) => f.write_str("crop"),
            Step::Rotate(angle) => write!(f, "rotate={angle}"),
            Step::Undo => f.write_str("undo"),
            Step::Reset => f.write_str("reset"),
            Step::Clear => f.write_str("clear"),
            Step::Copy => f.write_str("copy"),
        }
    }
}
