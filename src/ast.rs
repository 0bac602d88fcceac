//! Roles, literals and the symbolic formula tree
//!
//! Every person owns one boolean variable meaning "this person is a knight".
//! A [`Literal`] is that variable with a sign, and a [`Formula`] combines
//! literals with the connectives that claims can express.
//!
//! Formulas are small (one claim rarely names more than a handful of people),
//! so CNF is produced by pushing negations down to the literals and
//! distributing disjunctions over conjunctions. No auxiliary variables are
//! introduced: every clause only mentions person variables.

use std::fmt;

use crate::instance::Registry;

/// The two kinds of island inhabitants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// Always tells the truth
    Knight,
    /// Always lies
    Knave,
}

impl Role {
    /// Parses a role word, singular or plural, ignoring case
    pub fn from_word(word: &str) -> Option<Role> {
        match word.to_lowercase().as_str() {
            "knight" | "knights" => Some(Role::Knight),
            "knave" | "knaves" => Some(Role::Knave),
            _ => None,
        }
    }

    /// Returns the singular role word
    pub const fn name(&self) -> &'static str {
        match self {
            Role::Knight => "knight",
            Role::Knave => "knave",
        }
    }

    /// Returns the opposite role
    pub const fn opposite(&self) -> Role {
        match self {
            Role::Knight => Role::Knave,
            Role::Knave => Role::Knight,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A signed person variable
///
/// Positive means "is a knight", negative means "is a knave".
/// Variables are 1-indexed, following the DIMACS convention.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Literal(i32);

impl Literal {
    /// The literal "person `var` is a knight"
    pub fn positive(var: u32) -> Self {
        debug_assert!(var > 0, "variable ids start at 1");
        Literal(var as i32)
    }

    /// The literal "person `var` is a `role`"
    pub fn of(var: u32, role: Role) -> Self {
        match role {
            Role::Knight => Self::positive(var),
            Role::Knave => Self::positive(var).negated(),
        }
    }

    /// Builds a literal from a DIMACS integer; zero is not a literal
    pub fn from_dimacs(lit: i32) -> Option<Self> {
        (lit != 0).then_some(Literal(lit))
    }

    /// Returns the variable this literal refers to
    pub fn var(self) -> u32 {
        self.0.unsigned_abs()
    }

    /// Returns true for "is a knight" literals
    pub fn is_positive(self) -> bool {
        self.0 > 0
    }

    /// Returns the complementary literal
    pub fn negated(self) -> Self {
        Literal(-self.0)
    }

    /// Returns the DIMACS integer for this literal
    pub fn to_dimacs(self) -> i32 {
        self.0
    }

    /// Evaluates the literal under an assignment of knights
    pub fn evaluate<F: Fn(u32) -> bool>(self, knight: &F) -> bool {
        knight(self.var()) == self.is_positive()
    }
}

impl std::ops::Not for Literal {
    type Output = Literal;

    fn not(self) -> Literal {
        self.negated()
    }
}

impl fmt::Debug for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_positive() {
            write!(f, "x{}", self.var())
        } else {
            write!(f, "¬x{}", self.var())
        }
    }
}

/// A proposition over person variables
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Formula {
    /// A single literal
    Lit(Literal),
    /// Negation
    Not(Box<Formula>),
    /// Conjunction of any number of operands (empty = true)
    And(Vec<Formula>),
    /// Disjunction of any number of operands (empty = false)
    Or(Vec<Formula>),
    /// Exclusive or of two operands
    Xor(Box<Formula>, Box<Formula>),
    /// Biconditional of two operands
    Iff(Box<Formula>, Box<Formula>),
    /// Implication from antecedent to consequent
    Implies(Box<Formula>, Box<Formula>),
}

impl Formula {
    /// Wraps a literal
    pub fn lit(literal: Literal) -> Formula {
        Formula::Lit(literal)
    }

    /// Conjunction of the given literals
    pub fn all_of(literals: &[Literal]) -> Formula {
        Formula::And(literals.iter().copied().map(Formula::Lit).collect())
    }

    /// Disjunction of the given literals
    pub fn any_of(literals: &[Literal]) -> Formula {
        Formula::Or(literals.iter().copied().map(Formula::Lit).collect())
    }

    /// Negates this formula
    pub fn not(self) -> Formula {
        Formula::Not(Box::new(self))
    }

    /// Exclusive or of two formulas
    pub fn xor(self, other: Formula) -> Formula {
        Formula::Xor(Box::new(self), Box::new(other))
    }

    /// Biconditional of two formulas
    pub fn iff(self, other: Formula) -> Formula {
        Formula::Iff(Box::new(self), Box::new(other))
    }

    /// Implication from this formula to `consequent`
    pub fn implies(self, consequent: Formula) -> Formula {
        Formula::Implies(Box::new(self), Box::new(consequent))
    }

    /// Returns a formula equivalent to the negation of this one, with the
    /// negation pushed one level down
    ///
    /// XOR and IFF are each other's complement, so the result never grows.
    pub fn negate(&self) -> Formula {
        match self {
            Formula::Lit(l) => Formula::Lit(l.negated()),
            Formula::Not(inner) => (**inner).clone(),
            Formula::And(fs) => Formula::Or(fs.iter().map(Formula::negate).collect()),
            Formula::Or(fs) => Formula::And(fs.iter().map(Formula::negate).collect()),
            Formula::Xor(a, b) => Formula::Iff(a.clone(), b.clone()),
            Formula::Iff(a, b) => Formula::Xor(a.clone(), b.clone()),
            Formula::Implies(a, b) => Formula::And(vec![(**a).clone(), b.negate()]),
        }
    }

    /// Expands this formula into an equivalent conjunction of clauses
    ///
    /// Clause and literal order are deterministic:
    /// - `a ⊕ b` becomes `(¬a ∨ ¬b) ∧ (a ∨ b)`
    /// - `a ↔ b` becomes `(¬a ∨ b) ∧ (a ∨ ¬b)`
    /// - `a → b` becomes `¬a ∨ b`
    pub fn cnf(&self) -> Vec<Vec<Literal>> {
        match self {
            Formula::Lit(l) => vec![vec![*l]],
            Formula::Not(inner) => inner.negate().cnf(),
            Formula::And(fs) => fs.iter().flat_map(Formula::cnf).collect(),
            Formula::Or(fs) => {
                let mut product: Vec<Vec<Literal>> = vec![Vec::new()];
                for f in fs {
                    let operand = f.cnf();
                    product = product
                        .iter()
                        .flat_map(|prefix| {
                            operand.iter().map(move |clause| {
                                let mut merged = prefix.clone();
                                merged.extend_from_slice(clause);
                                merged
                            })
                        })
                        .collect();
                }
                product
            }
            Formula::Xor(a, b) => {
                let mut clauses = Formula::Or(vec![a.negate(), b.negate()]).cnf();
                clauses.extend(Formula::Or(vec![(**a).clone(), (**b).clone()]).cnf());
                clauses
            }
            Formula::Iff(a, b) => {
                let mut clauses = Formula::Or(vec![a.negate(), (**b).clone()]).cnf();
                clauses.extend(Formula::Or(vec![(**a).clone(), b.negate()]).cnf());
                clauses
            }
            Formula::Implies(a, b) => Formula::Or(vec![a.negate(), (**b).clone()]).cnf(),
        }
    }

    /// Evaluates the formula under an assignment of knights
    pub fn evaluate<F: Fn(u32) -> bool>(&self, knight: &F) -> bool {
        match self {
            Formula::Lit(l) => l.evaluate(knight),
            Formula::Not(inner) => !inner.evaluate(knight),
            Formula::And(fs) => fs.iter().all(|f| f.evaluate(knight)),
            Formula::Or(fs) => fs.iter().any(|f| f.evaluate(knight)),
            Formula::Xor(a, b) => a.evaluate(knight) != b.evaluate(knight),
            Formula::Iff(a, b) => a.evaluate(knight) == b.evaluate(knight),
            Formula::Implies(a, b) => !a.evaluate(knight) || b.evaluate(knight),
        }
    }

    /// Returns the sorted, deduplicated variables mentioned in the formula
    pub fn variables(&self) -> Vec<u32> {
        let mut vars = Vec::new();
        self.collect_variables(&mut vars);
        vars.sort_unstable();
        vars.dedup();
        vars
    }

    fn collect_variables(&self, out: &mut Vec<u32>) {
        match self {
            Formula::Lit(l) => out.push(l.var()),
            Formula::Not(inner) => inner.collect_variables(out),
            Formula::And(fs) | Formula::Or(fs) => {
                for f in fs {
                    f.collect_variables(out);
                }
            }
            Formula::Xor(a, b) | Formula::Iff(a, b) | Formula::Implies(a, b) => {
                a.collect_variables(out);
                b.collect_variables(out);
            }
        }
    }

    /// Renders the formula with person names instead of variable ids
    pub fn display<'a>(&'a self, registry: &'a Registry) -> NamedFormula<'a> {
        NamedFormula {
            formula: self,
            registry: Some(registry),
        }
    }

    fn is_compound(&self) -> bool {
        !matches!(self, Formula::Lit(_) | Formula::Not(_))
    }

    fn write_with(&self, f: &mut fmt::Formatter<'_>, registry: Option<&Registry>) -> fmt::Result {
        let operand = |f: &mut fmt::Formatter<'_>, op: &Formula| -> fmt::Result {
            if op.is_compound() {
                f.write_str("(")?;
                op.write_with(f, registry)?;
                f.write_str(")")
            } else {
                op.write_with(f, registry)
            }
        };
        let joined = |f: &mut fmt::Formatter<'_>, ops: &[Formula], sep: &str, empty: &str| -> fmt::Result {
            if ops.is_empty() {
                return f.write_str(empty);
            }
            for (i, op) in ops.iter().enumerate() {
                if i > 0 {
                    f.write_str(sep)?;
                }
                operand(f, op)?;
            }
            Ok(())
        };

        match self {
            Formula::Lit(l) => {
                if !l.is_positive() {
                    f.write_str("¬")?;
                }
                match registry.and_then(|r| r.name_of(l.var())) {
                    Some(name) => f.write_str(name),
                    None => write!(f, "x{}", l.var()),
                }
            }
            Formula::Not(inner) => {
                f.write_str("¬")?;
                operand(f, inner)
            }
            Formula::And(fs) => joined(f, fs, " ∧ ", "⊤"),
            Formula::Or(fs) => joined(f, fs, " ∨ ", "⊥"),
            Formula::Xor(a, b) => {
                operand(f, a)?;
                f.write_str(" ⊕ ")?;
                operand(f, b)
            }
            Formula::Iff(a, b) => {
                operand(f, a)?;
                f.write_str(" ↔ ")?;
                operand(f, b)
            }
            Formula::Implies(a, b) => {
                operand(f, a)?;
                f.write_str(" → ")?;
                operand(f, b)
            }
        }
    }
}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_with(f, None)
    }
}

/// A formula paired with the registry used to name its variables
pub struct NamedFormula<'a> {
    formula: &'a Formula,
    registry: Option<&'a Registry>,
}

impl fmt::Display for NamedFormula<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.formula.write_with(f, self.registry)
    }
}
