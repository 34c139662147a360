//! Test helpers for kernel tests
//!
//! A small value type with Lisp `eq` semantics, printers to register as the
//! formatter, and a tiny evaluator for block/tagbody/catch forms that drives
//! an `ExecutionContext` the way a real evaluator would.

use crate::kernel::{
    catch_block, catch_tag, catch_throw, primitives, EvalResult, ExecutionContext, Flow,
    FormatError, Ident, Identity, Resume, Signal,
};
use std::rc::Rc;

/* ===================== Values ===================== */

#[derive(Debug, Clone)]
pub enum Val {
    Nil,
    Int(i64),
    Sym(Ident),
    Str(Rc<str>),
}

impl Val {
    pub fn str(s: &str) -> Val {
        Val::Str(Rc::from(s))
    }

    pub fn label(&self) -> String {
        match self {
            Val::Nil => "nil".to_string(),
            Val::Int(n) => n.to_string(),
            Val::Sym(ident) => ident.name().to_string(),
            Val::Str(s) => s.to_string(),
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Val::Int(n) => Some(*n),
            _ => None,
        }
    }
}

impl Identity for Val {
    fn is_same(&self, other: &Self) -> bool {
        match (self, other) {
            (Val::Nil, Val::Nil) => true,
            (Val::Int(a), Val::Int(b)) => a == b,
            (Val::Sym(a), Val::Sym(b)) => a.is_same(b),
            (Val::Str(a), Val::Str(b)) => a.is_same(b),
            _ => false,
        }
    }
}

/// Build a context with `label_printer` registered
pub fn labelled_context(limit: usize) -> ExecutionContext<Val> {
    let ctx = ExecutionContext::with_limit(limit);
    ctx.register_formatter(label_printer)
        .expect("fresh context accepts a formatter");
    ctx
}

/* ===================== Printers ===================== */

/// Renders `~S` as the bare label; `~A` likewise; text passes through
pub fn label_printer(directive: &str, data: &[Val]) -> Result<String, FormatError> {
    let mut out = String::new();
    let mut data = data.iter();
    let mut chars = directive.chars();
    while let Some(c) = chars.next() {
        if c != '~' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('S') | Some('A') => {
                let datum = data
                    .next()
                    .ok_or_else(|| FormatError::new("missing datum"))?;
                out.push_str(&datum.label());
            }
            Some(other) => return Err(FormatError::new(format!("bad directive ~{}", other))),
            None => return Err(FormatError::new("dangling ~")),
        }
    }
    Ok(out)
}

/// Like `label_printer`, but fails on any datum labelled `label`
pub fn failing_on(label: &'static str) -> impl Fn(&str, &[Val]) -> Result<String, FormatError> {
    move |directive, data| {
        if data.iter().any(|v| v.label() == label) {
            return Err(FormatError::new(format!("cannot print {}", label)));
        }
        label_printer(directive, data)
    }
}

/* ===================== Mini Evaluator ===================== */

/// Forms understood by the test evaluator
#[derive(Debug, Clone)]
pub enum Form {
    Const(Val),
    /// Append the value to the output log
    Emit(Box<Form>),
    Progn(Vec<Form>),
    Block {
        name: Ident,
        body: Vec<Form>,
    },
    ReturnFrom {
        name: Ident,
        value: Box<Form>,
    },
    /// Tag body at nesting `level`; `Item::Tag(i)` marks tag `i`
    TagBody {
        level: usize,
        items: Vec<Item>,
    },
    Go {
        level: usize,
        index: usize,
    },
    /// Evaluates `then` only while the log is shorter than `len`
    WhileLogShorter {
        len: usize,
        then: Box<Form>,
    },
    Catch {
        tag: Box<Form>,
        body: Vec<Form>,
    },
    Throw {
        tag: Box<Form>,
        value: Box<Form>,
    },
    /// `raise` with a directive and evaluated data
    Raise {
        directive: &'static str,
        data: Vec<Form>,
    },
    /// The plain `error` primitive
    Error(&'static str),
    /// Nest `depth` frames around `body`
    Recurse {
        depth: usize,
        body: Box<Form>,
    },
}

#[derive(Debug, Clone)]
pub enum Item {
    Tag(usize),
    Stmt(Form),
}

impl Form {
    fn frame(&self) -> Val {
        let label = match self {
            Form::Const(_) => "const".to_string(),
            Form::Emit(_) => "emit".to_string(),
            Form::Progn(_) => "progn".to_string(),
            Form::Block { name, .. } => format!("(block {})", name),
            Form::ReturnFrom { name, .. } => format!("(return-from {})", name),
            Form::TagBody { level, .. } => format!("(tagbody {})", level),
            Form::Go { level, index } => format!("(go {} {})", level, index),
            Form::WhileLogShorter { .. } => "when".to_string(),
            Form::Catch { .. } => "(catch)".to_string(),
            Form::Throw { .. } => "(throw)".to_string(),
            Form::Raise { .. } => "(raise)".to_string(),
            Form::Error(_) => "(error)".to_string(),
            Form::Recurse { depth, .. } => format!("(recurse {})", depth),
        };
        Val::str(&label)
    }
}

/// Evaluate `form` with one ledger frame per nested evaluation
pub fn eval(ctx: &mut ExecutionContext<Val>, log: &mut Vec<Val>, form: &Form) -> EvalResult<Val> {
    ctx.with_frame(form.frame(), |ctx| eval_inner(ctx, log, form))
}

fn eval_inner(ctx: &mut ExecutionContext<Val>, log: &mut Vec<Val>, form: &Form) -> EvalResult<Val> {
    match form {
        Form::Const(v) => Ok(v.clone()),

        Form::Emit(inner) => {
            let v = eval(ctx, log, inner)?;
            log.push(v.clone());
            Ok(v)
        }

        Form::Progn(body) => eval_body(ctx, log, body),

        Form::Block { name, body } => {
            let result = eval_body(ctx, log, body);
            catch_block(name, result)
        }

        Form::ReturnFrom { name, value } => {
            let value = eval(ctx, log, value)?;
            Err(Signal::block(name.clone(), value).into())
        }

        Form::TagBody { level, items } => {
            let tag_count = items.iter().filter(|i| matches!(i, Item::Tag(_))).count();
            let mut pc = 0;
            while pc < items.len() {
                let Item::Stmt(stmt) = &items[pc] else {
                    pc += 1;
                    continue;
                };
                match catch_tag(*level, tag_count, eval(ctx, log, stmt))? {
                    Resume::Value(_) => pc += 1,
                    Resume::Go(index) => {
                        pc = items
                            .iter()
                            .position(|i| matches!(i, Item::Tag(t) if *t == index))
                            .expect("go target exists in tag body");
                    }
                }
            }
            Ok(Val::Nil)
        }

        Form::Go { level, index } => Err(Signal::tag(*level, *index).into()),

        Form::WhileLogShorter { len, then } => {
            if log.len() < *len {
                eval(ctx, log, then)
            } else {
                Ok(Val::Nil)
            }
        }

        Form::Catch { tag, body } => {
            let tag = eval(ctx, log, tag)?;
            let result = eval_body(ctx, log, body);
            catch_throw(&tag, result)
        }

        Form::Throw { tag, value } => {
            let tag = eval(ctx, log, tag)?;
            let value = eval(ctx, log, value)?;
            Err(Signal::catch(tag, value).into())
        }

        Form::Raise { directive, data } => {
            let mut values = Vec::with_capacity(data.len());
            for d in data {
                values.push(eval(ctx, log, d)?);
            }
            Err(Flow::Fatal(ctx.raise(directive, &values)))
        }

        Form::Error(message) => primitives::error(*message),

        Form::Recurse { depth, body } => {
            if *depth == 0 {
                eval(ctx, log, body)
            } else {
                let next = Form::Recurse {
                    depth: depth - 1,
                    body: body.clone(),
                };
                eval(ctx, log, &next)
            }
        }
    }
}

fn eval_body(ctx: &mut ExecutionContext<Val>, log: &mut Vec<Val>, body: &[Form]) -> EvalResult<Val> {
    let mut last = Val::Nil;
    for form in body {
        last = eval(ctx, log, form)?;
    }
    Ok(last)
}

/// Evaluate a top-level form and close it with `finish`
pub fn run(
    ctx: &mut ExecutionContext<Val>,
    form: &Form,
) -> (Result<Val, crate::kernel::Fatal>, Vec<Val>) {
    let mut log = Vec::new();
    let result = eval(ctx, &mut log, form);
    (ctx.finish(result), log)
}

/* ===================== Builders ===================== */

pub fn int(n: i64) -> Form {
    Form::Const(Val::Int(n))
}

pub fn sym(ident: &Ident) -> Form {
    Form::Const(Val::Sym(ident.clone()))
}

pub fn emit(form: Form) -> Form {
    Form::Emit(Box::new(form))
}
