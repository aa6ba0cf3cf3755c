//! Symbol table
//!
//! One table per analysis run. Entries keep their insertion order, and the
//! position of an entry is its register number in the symbol report.

use crate::parser::ast::Type;
use crate::semantic::errors::SemanticError;
use crate::semantic::value::Value;
use rustc_hash::FxHashMap;
use std::collections::BTreeSet;

/// A declared variable
#[derive(Debug, Clone, PartialEq)]
pub struct Symbol {
    pub name: String,
    pub ty: Type,
    /// Current constant value, `None` when unknown
    pub value: Option<Value>,
    /// Insertion ordinal, fixed at the first declaration
    pub register: usize,
    pub declared_line: usize,
    /// Declaration and use lines, ascending and without duplicates
    pub lines: BTreeSet<usize>,
}

#[derive(Debug, Default)]
pub struct SymbolTable {
    entries: Vec<Symbol>,
    index: FxHashMap<String, usize>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare `name` with type `ty` on `line`.
    ///
    /// Redeclaring with the same type only records the line. Redeclaring with
    /// a different type fails with [`SemanticError::TypeConflict`] and leaves
    /// the entry untouched.
    pub fn declare(&mut self, name: &str, ty: Type, line: usize) -> Result<&Symbol, SemanticError> {
        if let Some(&idx) = self.index.get(name) {
            let symbol = &mut self.entries[idx];
            if symbol.ty != ty {
                return Err(SemanticError::TypeConflict {
                    name: name.to_string(),
                    declared: symbol.ty,
                    found: ty,
                    declared_line: symbol.declared_line,
                    line,
                });
            }
            symbol.lines.insert(line);
            return Ok(&self.entries[idx]);
        }

        let register = self.entries.len();
        self.entries.push(Symbol {
            name: name.to_string(),
            ty,
            value: None,
            register,
            declared_line: line,
            lines: BTreeSet::from([line]),
        });
        self.index.insert(name.to_string(), register);
        Ok(&self.entries[register])
    }

    /// Find a declared variable. `line` is reported when it is missing.
    pub fn lookup(&self, name: &str, line: usize) -> Result<&Symbol, SemanticError> {
        self.get(name)
            .ok_or_else(|| SemanticError::UndeclaredVariable {
                name: name.to_string(),
                line,
            })
    }

    /// Store a new value for `name` and record `line`
    pub fn assign(
        &mut self,
        name: &str,
        value: Option<Value>,
        line: usize,
    ) -> Result<&Symbol, SemanticError> {
        let symbol = self.entry_mut(name, line)?;
        symbol.value = value;
        symbol.lines.insert(line);
        Ok(symbol)
    }

    /// Record a read of `name` on `line`
    pub fn mark_use(&mut self, name: &str, line: usize) -> Result<&Symbol, SemanticError> {
        let symbol = self.entry_mut(name, line)?;
        symbol.lines.insert(line);
        Ok(symbol)
    }

    fn entry_mut(&mut self, name: &str, line: usize) -> Result<&mut Symbol, SemanticError> {
        match self.index.get(name) {
            Some(&idx) => Ok(&mut self.entries[idx]),
            None => Err(SemanticError::UndeclaredVariable {
                name: name.to_string(),
                line,
            }),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Symbol> {
        self.index.get(name).map(|&idx| &self.entries[idx])
    }

    /// Entries in register order
    pub fn iter(&self) -> impl Iterator<Item = &Symbol> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declare_assigns_registers_in_order() {
        let mut table = SymbolTable::new();
        assert_eq!(table.declare("a", Type::Int, 1).unwrap().register, 0);
        assert_eq!(table.declare("b", Type::Float, 2).unwrap().register, 1);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_same_type_redeclaration_keeps_register() {
        let mut table = SymbolTable::new();
        table.declare("x", Type::Int, 1).unwrap();
        table.declare("y", Type::Int, 2).unwrap();
        let x = table.declare("x", Type::Int, 5).unwrap();

        assert_eq!(x.register, 0);
        assert_eq!(x.declared_line, 1);
        assert_eq!(x.lines.iter().copied().collect::<Vec<_>>(), vec![1, 5]);
    }

    #[test]
    fn test_conflicting_redeclaration() {
        let mut table = SymbolTable::new();
        table.declare("x", Type::Int, 3).unwrap();
        let err = table.declare("x", Type::Float, 7).unwrap_err();

        assert_eq!(
            err,
            SemanticError::TypeConflict {
                name: "x".to_string(),
                declared: Type::Int,
                found: Type::Float,
                declared_line: 3,
                line: 7,
            }
        );
        assert!(err.to_string().contains("line 3"));
        assert_eq!(table.get("x").unwrap().ty, Type::Int);
    }

    #[test]
    fn test_lookup_and_assign_undeclared() {
        let mut table = SymbolTable::new();
        assert!(matches!(
            table.lookup("z", 4),
            Err(SemanticError::UndeclaredVariable { line: 4, .. })
        ));
        assert!(table.assign("z", Some(Value::Int(1)), 4).is_err());
        assert!(table.is_empty());
    }

    #[test]
    fn test_assign_updates_value_and_lines() {
        let mut table = SymbolTable::new();
        table.declare("n", Type::Int, 1).unwrap();
        table.assign("n", Some(Value::Int(9)), 2).unwrap();
        table.assign("n", Some(Value::Int(10)), 2).unwrap();

        let n = table.lookup("n", 3).unwrap();
        assert_eq!(n.value, Some(Value::Int(10)));
        assert_eq!(n.lines.len(), 2);
    }
}
