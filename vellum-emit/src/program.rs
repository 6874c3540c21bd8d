//! Ordered operation list for one component instance

use serde::{Deserialize, Serialize};

use crate::ops::EmitOp;

/// Operations emitted for one component instance, in emission order
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EmitProgram {
    /// Component kind that produced the program (e.g. `display_buffer`)
    pub component: String,
    ops: Vec<EmitOp>,
}

impl EmitProgram {
    /// Create an empty program for a component kind
    pub fn new(component: impl Into<String>) -> Self {
        Self {
            component: component.into(),
            ops: Vec::new(),
        }
    }

    /// Append an operation
    pub fn push(&mut self, op: EmitOp) {
        self.ops.push(op);
    }

    /// Operations in emission order
    pub fn ops(&self) -> &[EmitOp] {
        &self.ops
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &EmitOp> {
        self.ops.iter()
    }

    /// Variable the program instantiates, if it has been emitted yet
    pub fn instance_id(&self) -> Option<&str> {
        self.ops
            .iter()
            .find(|op| op.is_instantiation())
            .map(EmitOp::target)
    }
}

impl<'a> IntoIterator for &'a EmitProgram {
    type Item = &'a EmitOp;
    type IntoIter = core::slice::Iter<'a, EmitOp>;

    fn into_iter(self) -> Self::IntoIter {
        self.ops.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::{Literal, TemplateArg, TypeRef};

    #[test]
    fn test_instance_id() {
        let mut program = EmitProgram::new("display_buffer");
        assert!(program.is_empty());
        assert_eq!(program.instance_id(), None);

        program.push(EmitOp::Instantiate {
            id: "fb".into(),
            class: TypeRef::new("display_buffer::Buffer"),
            template: TemplateArg::Default,
        });
        program.push(EmitOp::setter("fb", "set_width", Literal::UInt(240)));

        assert_eq!(program.len(), 2);
        assert_eq!(program.instance_id(), Some("fb"));
    }
}
