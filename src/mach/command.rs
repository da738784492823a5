use super::{Bindings, FrameKind, Live, Session};
use crate::error;
use crate::lang::{Error, ErrorCode};

type Result<T> = std::result::Result<T, Error>;

const UNNAMED: char = '%';

const FOR_LINE_HELP: &str = "Executes commands for each item in a set of items";

const FOR_VERBOSE_HELP: &str = "\
Executes commands for each item in a set of items.

FOR %<var> IN <set>
  ...
ENDFOR

FOR %<var> RUN (<start> <end> [<step>])
  ...
ENDFOR

    var    - Single letter loop variable, substituted as %<var>
    set    - Values bound to the variable, in order
    start  - First value of a numeric range
    end    - Last value of a numeric range
    step   - Increment, default 1 or -1

Only supported in script files. Loops may nest, and GOTO may jump into,
out of or across loop bodies.
";

pub fn for_line_help() -> &'static str {
    FOR_LINE_HELP
}

pub fn endfor_line_help() -> Option<&'static str> {
    None
}

fn is_help_request(args: &[String]) -> bool {
    let is = |s: &String, flag: &str| s.eq_ignore_ascii_case(flag);
    match args {
        [_, a] => is(a, "-?"),
        [_, a, b] => (is(a, "-?") && is(b, "-b")) || (is(a, "-b") && is(b, "-?")),
        _ => false,
    }
}

/// Strict loop variable: a single letter, optionally written `%a`.
fn loop_variable(token: &str) -> Option<char> {
    let name = token.strip_prefix('%').unwrap_or(token);
    let mut chars = name.chars();
    match (chars.next(), chars.next()) {
        (Some(ch), None) if ch.is_ascii_alphabetic() => Some(ch),
        _ => None,
    }
}

/// Loop variable as seen by a jump scan, which does not validate it.
/// A token without a name gets one no `%x` reference can match.
fn scanned_variable(token: &str) -> char {
    token
        .strip_prefix('%')
        .unwrap_or(token)
        .chars()
        .next()
        .unwrap_or(UNNAMED)
}

/// ## `for %<var> in <value>...` and `for %<var> run (<start> <end> [<step>])`
pub fn for_command(session: &mut Session, args: &[String]) -> Result<()> {
    if is_help_request(args) {
        session.print(FOR_VERBOSE_HELP);
        return Ok(());
    }
    if !session.is_batch_mode_active() {
        return Err(session.fail(error!(OnlyInScript).in_command("for")));
    }
    let line_number = session.current_line_number();
    let syntax_error = || error!(SyntaxError, line_number).in_command("for");
    if args.len() < 4 {
        return Err(session.fail(syntax_error()));
    }
    let values = &args[3..];
    let range = if args[2].eq_ignore_ascii_case("run") {
        true
    } else if args[2].eq_ignore_ascii_case("in") {
        false
    } else {
        return Err(session.fail(syntax_error()));
    };
    let bindings = || {
        if range {
            Bindings::from_range(values)
        } else {
            Ok(Bindings::new(values))
        }
    };

    let result = if !session.is_goto_active() {
        match loop_variable(&args[1]) {
            Some(variable) => {
                bindings().and_then(|b| session.enter_loop(variable, b, Live::Primary))
            }
            None => Err(syntax_error()),
        }
    } else {
        // A scan may meet a loop over the same letter as an enclosing one,
        // so the variable is not checked here.
        let consumed = if session.is_search_phase() {
            session.try_consume_level(FrameKind::For)
        } else {
            Ok(false)
        };
        consumed.and_then(|consumed| {
            if consumed {
                return Ok(());
            }
            let variable = scanned_variable(&args[1]);
            bindings().and_then(|b| session.enter_loop(variable, b, Live::Extra))
        })
    };
    result.map_err(|error| {
        let error = if error.line_number().is_none() {
            error.in_line_number(line_number)
        } else {
            error
        };
        session.fail(error.in_command("for").as_syntax_error())
    })
}

/// ## `endfor`
pub fn endfor_command(session: &mut Session, args: &[String]) -> Result<()> {
    if !session.is_batch_mode_active() {
        return Err(session.fail(error!(OnlyInScript).in_command("endfor")));
    }
    let line_number = session.current_line_number();
    if args.len() > 1 {
        return Err(session.fail(error!(TooManyArguments, line_number).in_command("endfor")));
    }

    let result = if !session.is_goto_active() {
        session.end_iteration()
    } else if !session.statements().is_empty(Live::Extra) {
        match session.statements().top(Live::Extra).map(|f| f.kind()) {
            Some(FrameKind::For) => session.statements_mut().pop(1, Live::Extra),
            _ => Err(error!(NoForStatement)),
        }
    } else {
        session.move_down(FrameKind::For)
    };
    result.map_err(|error| {
        let error = match error.code() {
            ErrorCode::NoCorrespondingFor | ErrorCode::NoForStatement => {
                error.in_line_number(line_number).in_command("endfor")
            }
            _ => error
                .in_line_number(line_number)
                .in_command("for")
                .as_syntax_error(),
        };
        session.fail(error)
    })
}

/// ## `goto <label>`
pub fn goto_command(session: &mut Session, args: &[String]) -> Result<()> {
    if !session.is_batch_mode_active() {
        return Err(session.fail(error!(OnlyInScript).in_command("goto")));
    }
    let line_number = session.current_line_number();
    match args {
        [_, label] => session.start_jump(label).map_err(|error| {
            let error = error.in_line_number(line_number).in_command("goto");
            session.fail(error.as_syntax_error())
        }),
        _ => Err(session.fail(error!(SyntaxError, line_number).in_command("goto"))),
    }
}
