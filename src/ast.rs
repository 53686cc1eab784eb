use std::fmt;

#[derive(Debug, PartialEq, Clone)]
pub struct Prototype {
    pub name: String,
    pub params: Vec<String>,
}

impl Prototype {
    pub fn new(name: impl Into<String>, params: Vec<String>) -> Self {
        Self {
            name: name.into(),
            params,
        }
    }

    /// the nameless, parameterless prototype wrapped around top-level expressions
    pub fn anonymous() -> Self {
        Self::new("", Vec::new())
    }

    pub fn is_anonymous(&self) -> bool {
        self.name.is_empty()
    }
}

#[derive(Debug, PartialEq, Clone)]
pub enum Expression {
    Number(f64),
    Variable(String),
    Binary(char, Box<Expression>, Box<Expression>),
    Call(String, Vec<Expression>),
}

impl Expression {
    pub fn binary(op: char, lhs: Expression, rhs: Expression) -> Self {
        Expression::Binary(op, Box::new(lhs), Box::new(rhs))
    }
}

#[derive(Debug, PartialEq, Clone)]
pub struct Function {
    pub prototype: Prototype,
    pub body: Expression,
}

impl Function {
    pub fn anonymous(body: Expression) -> Self {
        Self {
            prototype: Prototype::anonymous(),
            body,
        }
    }
}

/// one unit accepted by the top-level loop
#[derive(Debug, PartialEq, Clone)]
pub enum TopLevel {
    Definition(Function),
    Extern(Prototype),
    Expression(Function),
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Number(value) => write!(f, "{}", value),
            Expression::Variable(name) => write!(f, "{}", name),
            Expression::Binary(op, lhs, rhs) => write!(f, "({} {} {})", op, lhs, rhs),
            Expression::Call(callee, args) => {
                write!(f, "(call {}", callee)?;
                for arg in args {
                    write!(f, " {}", arg)?;
                }
                write!(f, ")")
            }
        }
    }
}

impl fmt::Display for Prototype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_anonymous() {
            write!(f, "(<anon>")?;
        } else {
            write!(f, "({}", self.name)?;
        }
        for param in &self.params {
            write!(f, " {}", param)?;
        }
        write!(f, ")")
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(def {} {})", self.prototype, self.body)
    }
}

impl fmt::Display for TopLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TopLevel::Definition(function) | TopLevel::Expression(function) => {
                write!(f, "{}", function)
            }
            TopLevel::Extern(prototype) => write!(f, "(extern {})", prototype),
        }
    }
}
