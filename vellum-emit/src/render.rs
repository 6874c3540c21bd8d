//! C++ statement rendering
//!
//! Each operation expands to one or more statements. Registrations expand
//! to the setter calls their collaborator performs followed by the
//! registration itself.

use crate::ops::{
    ComponentRegistration, DisplayRegistration, EmitOp, Literal, Registration, TemplateArg,
};
use crate::program::EmitProgram;

/// Runtime sentinel for "never update"
pub const NEVER_UPDATE_MS: u32 = u32::MAX;

/// Render a single operation into statements
pub fn render_op(op: &EmitOp) -> Vec<String> {
    match op {
        EmitOp::Instantiate {
            id,
            class,
            template,
        } => {
            let args = match template {
                // `display_buffer::Buffer` declares no default pixel type, so
                // `<>` only compiles against a runtime that adds one
                TemplateArg::Default => "<>".to_string(),
                TemplateArg::Type(ty) => format!("<{}>", ty),
            };
            vec![format!("auto *{} = new {}{}();", id, class, args)]
        }
        EmitOp::CallSetter {
            target,
            setter,
            value,
        } => vec![format!("{}->{}({});", target, setter, value)],
        EmitOp::Register {
            target,
            registration,
        } => match registration {
            Registration::Component(c) => render_component(target, c),
            Registration::Display(d) => render_display(target, d),
        },
        EmitOp::SetCallback {
            target,
            setter,
            lambda,
        } => vec![format!("{}->{}({});", target, setter, lambda.render())],
    }
}

fn render_component(target: &str, reg: &ComponentRegistration) -> Vec<String> {
    let mut out = Vec::new();
    if let Some(priority) = reg.setup_priority {
        out.push(format!(
            "{}->set_setup_priority({});",
            target,
            Literal::Float(priority)
        ));
    }
    if let Some(ms) = reg.update_interval_ms {
        out.push(format!("{}->set_update_interval({});", target, ms));
    }
    out.push(format!("App.register_component({});", target));
    out
}

fn render_display(target: &str, reg: &DisplayRegistration) -> Vec<String> {
    let mut out = Vec::new();
    if let Some(rotation) = &reg.rotation {
        out.push(format!("{}->set_rotation({});", target, rotation));
    }
    if let Some(auto_clear) = reg.auto_clear {
        out.push(format!(
            "{}->set_auto_clear({});",
            target,
            Literal::Bool(auto_clear)
        ));
    }
    if !reg.pages.is_empty() {
        for page in &reg.pages {
            out.push(format!(
                "auto *{} = new {}({});",
                page.id,
                page.class,
                page.writer.render()
            ));
        }
        let ids = reg
            .pages
            .iter()
            .map(|p| p.id.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        out.push(format!("{}->set_pages({{{}}});", target, ids));
    }
    if reg.show_test_card {
        out.push(format!("{}->show_test_card();", target));
    }
    out
}

impl EmitProgram {
    /// Render all operations, one statement per line
    pub fn render(&self) -> String {
        let mut out = String::new();
        for op in self {
            for stmt in render_op(op) {
                out.push_str(&stmt);
                out.push('\n');
            }
        }
        out
    }
}
