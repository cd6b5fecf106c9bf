use crate::interpreter::error::{Result, SyntaxError};
use crate::interpreter::operator::{BinaryOperator, UnaryOperator};
use crate::interpreter::parser::parse_number;
use crate::interpreter::syntax::syntax_visitor::{
    walk_binary_operation, walk_unary_operation, SyntaxVisitor,
};
use crate::interpreter::token::{Token, TokenKind};
use itertools::Itertools;
use ptree::{write_tree, TreeBuilder};
use std::fmt;
use std::fmt::{Debug, Display, Formatter};

/// An arithmetic expression. Every node exclusively owns its children.
#[derive(Clone, PartialEq)]
pub enum Node {
    // Terminal symbols (leaves)
    Number(f64),
    Variable(String),
    // Non-terminal symbols (non-leaves)
    BinaryOperation {
        operator: BinaryOperator,
        left_operand: Box<Node>,
        right_operand: Box<Node>,
    },
    UnaryOperation {
        operator: UnaryOperator,
        operand: Box<Node>,
    },
}

impl Node {
    pub fn new_number(value: f64) -> Node {
        Node::Number(value)
    }

    pub fn new_variable(name: String) -> Node {
        Node::Variable(name)
    }

    pub fn new_binary(operator: BinaryOperator, left_operand: Node, right_operand: Node) -> Node {
        Node::BinaryOperation {
            operator,
            left_operand: Box::new(left_operand),
            right_operand: Box::new(right_operand),
        }
    }

    pub fn new_binary_addition(left_operand: Node, right_operand: Node) -> Node {
        Self::new_binary(BinaryOperator::Add, left_operand, right_operand)
    }

    pub fn new_binary_subtraction(left_operand: Node, right_operand: Node) -> Node {
        Self::new_binary(BinaryOperator::Subtract, left_operand, right_operand)
    }

    pub fn new_binary_multiplication(left_operand: Node, right_operand: Node) -> Node {
        Self::new_binary(BinaryOperator::Multiply, left_operand, right_operand)
    }

    pub fn new_binary_division(left_operand: Node, right_operand: Node) -> Node {
        Self::new_binary(BinaryOperator::Divide, left_operand, right_operand)
    }

    pub fn new_negation(operand: Node) -> Node {
        Node::UnaryOperation {
            operator: UnaryOperator::Negate,
            operand: Box::new(operand),
        }
    }

    pub fn is_value(&self) -> bool {
        matches!(self, Node::Number(_) | Node::Variable(_))
    }

    pub fn as_binary_operator(&self) -> Option<BinaryOperator> {
        match self {
            Node::BinaryOperation { operator, .. } => Some(*operator),
            Node::Number(_) | Node::Variable(_) | Node::UnaryOperation { .. } => None,
        }
    }

    /// Calls the correct visitor method for the node variant on the given visitor.
    pub(crate) fn accept(&self, visitor: &mut impl SyntaxVisitor) {
        match self {
            Node::Number(value) => visitor.visit_number(*value),
            Node::Variable(name) => visitor.visit_variable(name),
            Node::BinaryOperation {
                operator,
                left_operand,
                right_operand,
            } => visitor.visit_binary_operation(operator, left_operand, right_operand),
            Node::UnaryOperation { operator, operand } => {
                visitor.visit_unary_operation(operator, operand)
            }
        }
    }

    /// Generates an expression tree based off of the given tokens.
    ///
    /// # Arguments
    ///
    /// * `postfix_tokens`: Tokens, ordered in postfix notation, to convert to an expression tree.
    ///
    /// returns: The root of the generated expression tree.
    pub fn from_postfix(postfix_tokens: &[Token]) -> Result<Node> {
        let mut operands: Vec<Node> = Vec::new();

        for token in postfix_tokens {
            match token.kind {
                TokenKind::Number => operands.push(Node::new_number(parse_number(token)?)),
                TokenKind::Variable => operands.push(Node::new_variable(token.text.clone())),
                TokenKind::Negate => {
                    let operand = operands.pop().ok_or(SyntaxError::MissingOperand)?;
                    operands.push(Node::new_negation(operand));
                }
                TokenKind::Add | TokenKind::Subtract | TokenKind::Multiply | TokenKind::Divide => {
                    let operator = BinaryOperator::from_token_kind(token.kind)
                        .ok_or_else(|| unsupported(token))?;
                    let operand_two = operands.pop().ok_or(SyntaxError::MissingOperand)?;
                    let operand_one = operands.pop().ok_or(SyntaxError::MissingOperand)?;
                    operands.push(Node::new_binary(operator, operand_one, operand_two));
                }
                TokenKind::OpenParenthesis
                | TokenKind::CloseParenthesis
                | TokenKind::EndOfInput => return Err(unsupported(token)),
            }
        }

        match operands.len() {
            1 => operands.pop().ok_or(SyntaxError::ResultCount(0)),
            count => Err(SyntaxError::ResultCount(count)),
        }
    }

    /// The distinct variable names referenced by the expression, in the order they first appear.
    pub fn variables(&self) -> Vec<String> {
        let mut visitor = VariableCollector { names: Vec::new() };
        self.accept(&mut visitor);
        visitor.names.into_iter().unique().collect()
    }

    /// Regenerates infix tokens for the expression, with as few parentheses as possible.
    ///
    /// Parsed trees only hold finite numbers. A non-finite number built by hand prints as
    /// `inf` or `NaN` and does not read back as a number.
    pub fn to_infix(&self) -> Vec<Token> {
        let mut tokens = Vec::new();
        self.build_expression(&mut tokens);
        tokens
    }

    fn build_expression(&self, tokens: &mut Vec<Token>) {
        match self {
            Node::Number(value) => tokens.push(Token::number(value.to_string())),
            Node::Variable(name) => tokens.push(Token::variable(name.as_str())),
            Node::BinaryOperation {
                operator,
                left_operand,
                right_operand,
            } => {
                let left_needs_parentheses = left_operand
                    .as_binary_operator()
                    .map_or(false, |child| operator.precedence_gt(&child));
                // a - (b - c) and a / (b * c) must keep their grouping.
                let right_needs_parentheses =
                    right_operand.as_binary_operator().map_or(false, |child| {
                        operator.precedence_gt(&child)
                            || (operator.precedence_eq(&child) && operator.is_right_sensitive())
                    });

                parenthesize_if(tokens, left_needs_parentheses, |tokens| {
                    left_operand.build_expression(tokens)
                });
                tokens.push(operator.token());
                parenthesize_if(tokens, right_needs_parentheses, |tokens| {
                    right_operand.build_expression(tokens)
                });
            }
            Node::UnaryOperation { operator, operand } => {
                tokens.push(operator.token());
                parenthesize_if(tokens, !operand.is_value(), |tokens| {
                    operand.build_expression(tokens)
                });
            }
        }
    }

    fn format_tree(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut visitor = TreeBuilderVisitor {
            builder: TreeBuilder::new("expression".into()),
        };
        self.accept(&mut visitor);

        let mut buffer: Vec<u8> = Vec::new();
        match write_tree(&visitor.builder.build(), &mut buffer) {
            Ok(_) => {}
            Err(_) => return Err(fmt::Error),
        }
        let text = match std::str::from_utf8(&buffer) {
            Ok(text) => text,
            Err(_) => return Err(fmt::Error),
        };
        f.write_str(text)
    }
}

fn unsupported(token: &Token) -> SyntaxError {
    SyntaxError::UnsupportedToken {
        stage: "Tree construction",
        token: token.to_string(),
    }
}

fn parenthesize_if(
    tokens: &mut Vec<Token>,
    predicate: bool,
    build_interior: impl FnOnce(&mut Vec<Token>),
) {
    if predicate {
        tokens.push(Token::symbol(TokenKind::OpenParenthesis));
    }

    build_interior(tokens);

    if predicate {
        tokens.push(Token::symbol(TokenKind::CloseParenthesis));
    }
}

impl Display for Node {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.format_tree(f)
    }
}

impl Debug for Node {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Node::Number(value) => write!(f, "{:?}", value),
            Node::Variable(name) => write!(f, "{:?}", name),
            Node::BinaryOperation {
                operator,
                left_operand,
                right_operand,
            } => write!(f, "{:?}({:?}, {:?})", operator, left_operand, right_operand),
            Node::UnaryOperation { operator, operand } => {
                write!(f, "{:?}({:?})", operator, operand)
            }
        }
    }
}

struct VariableCollector {
    names: Vec<String>,
}

impl SyntaxVisitor for VariableCollector {
    fn visit_variable(&mut self, name: &str) {
        self.names.push(name.to_string());
    }
}

struct TreeBuilderVisitor {
    builder: TreeBuilder,
}

impl SyntaxVisitor for TreeBuilderVisitor {
    fn visit_number(&mut self, value: f64) {
        self.builder.add_empty_child(format!("{}", value));
    }
    fn visit_variable(&mut self, name: &str) {
        self.builder.add_empty_child(name.to_string());
    }
    fn visit_binary_operation(
        &mut self,
        operator: &BinaryOperator,
        left_operand: &Node,
        right_operand: &Node,
    ) {
        self.builder.begin_child(format!("{}", operator));
        walk_binary_operation(self, left_operand, right_operand);
        self.builder.end_child();
    }
    fn visit_unary_operation(&mut self, operator: &UnaryOperator, operand: &Node) {
        self.builder.begin_child(format!("{}", operator));
        walk_unary_operation(self, operand);
        self.builder.end_child();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::tokens_to_string;
    use pretty_assertions::assert_eq;

    #[test]
    fn simple_expression_returns_correct_tree() {
        let tokens = create_simple_postfix_tokens();
        let expected_tree = create_simple_tree();

        let actual_tree = Node::from_postfix(&tokens).unwrap();

        assert_eq!(actual_tree, expected_tree);
    }

    #[test]
    fn complex_expression_returns_correct_tree() {
        let tokens = create_complex_postfix_tokens();
        let expected_tree = create_complex_tree();

        let actual_tree = Node::from_postfix(&tokens).unwrap();

        assert_eq!(actual_tree, expected_tree);
    }

    #[test]
    fn negation_in_postfix_wraps_single_operand() {
        let tokens = vec![Token::variable("x"), Token::symbol(TokenKind::Negate)];

        let actual_tree = Node::from_postfix(&tokens).unwrap();

        assert_eq!(
            actual_tree,
            Node::new_negation(Node::new_variable("x".into()))
        );
    }

    #[test]
    fn operator_without_operands_is_rejected() {
        let tokens = vec![Token::number("1"), Token::symbol(TokenKind::Add)];

        assert_eq!(
            Node::from_postfix(&tokens).unwrap_err(),
            SyntaxError::MissingOperand
        );
    }

    #[test]
    fn leftover_operands_are_rejected() {
        let tokens = vec![Token::number("1"), Token::number("2")];

        assert_eq!(
            Node::from_postfix(&tokens).unwrap_err(),
            SyntaxError::ResultCount(2)
        );
    }

    #[test]
    fn print_succeeds() {
        let tree = create_complex_tree();

        let printed = tree.to_string();

        assert!(printed.starts_with("expression"));
        assert!(printed.contains('*'));
    }

    #[test]
    fn simple_tree_converts_back_to_simple_expression() {
        let expected_tokens = create_simple_infix_tokens();
        let tree = create_simple_tree();

        let actual_tokens = tree.to_infix();

        assert_eq!(actual_tokens, expected_tokens);
    }

    #[test]
    fn complex_tree_converts_back_to_simple_expression() {
        let expected_tokens = create_complex_infix_tokens();
        let tree = create_complex_tree();

        let actual_tokens = tree.to_infix();

        assert_eq!(actual_tokens, expected_tokens);
    }

    #[test]
    fn right_operand_of_subtraction_keeps_its_parentheses() {
        let tree = Node::new_binary_subtraction(
            Node::new_variable("a".into()),
            Node::new_binary_subtraction(
                Node::new_variable("b".into()),
                Node::new_variable("c".into()),
            ),
        );

        assert_eq!(tokens_to_string(&tree.to_infix()), "a - (b - c)");
    }

    #[test]
    fn left_associative_chain_needs_no_parentheses() {
        let tree = Node::new_binary_division(
            Node::new_binary_division(Node::new_number(8.0), Node::new_number(4.0)),
            Node::new_number(2.0),
        );

        assert_eq!(tokens_to_string(&tree.to_infix()), "8 / 4 / 2");
    }

    #[test]
    fn negated_composite_is_parenthesized() {
        let tree = Node::new_binary_multiplication(
            Node::new_negation(Node::new_binary_addition(
                Node::new_variable("x".into()),
                Node::new_number(0.5),
            )),
            Node::new_negation(Node::new_variable("y".into())),
        );

        assert_eq!(tokens_to_string(&tree.to_infix()), "-(x + 0.5) * -y");
    }

    #[test]
    fn variables_are_listed_once_in_order_of_appearance() {
        let tree = Node::new_binary_addition(
            Node::new_binary_multiplication(
                Node::new_variable("b".into()),
                Node::new_variable("a".into()),
            ),
            Node::new_negation(Node::new_variable("b".into())),
        );

        assert_eq!(tree.variables(), vec!["b".to_string(), "a".to_string()]);
    }

    fn create_simple_tree() -> Node {
        let x = Node::new_variable("x".into());
        let y = Node::new_variable("y".into());
        Node::new_binary_addition(x, y)
    }

    fn create_simple_postfix_tokens() -> Vec<Token> {
        // x + y (but in postfix notation)
        vec![
            Token::variable("x"),
            Token::variable("y"),
            Token::symbol(TokenKind::Add),
        ]
    }

    fn create_simple_infix_tokens() -> Vec<Token> {
        // x + y
        vec![
            Token::variable("x"),
            Token::symbol(TokenKind::Add),
            Token::variable("y"),
        ]
    }

    fn create_complex_postfix_tokens() -> Vec<Token> {
        // x + ((y + z) * a) (but in postfix notation)
        vec![
            Token::variable("x"),
            Token::variable("y"),
            Token::variable("z"),
            Token::symbol(TokenKind::Add),
            Token::variable("a"),
            Token::symbol(TokenKind::Multiply),
            Token::symbol(TokenKind::Add),
        ]
    }

    fn create_complex_infix_tokens() -> Vec<Token> {
        // x + (y + z) * a
        vec![
            Token::variable("x"),
            Token::symbol(TokenKind::Add),
            Token::symbol(TokenKind::OpenParenthesis),
            Token::variable("y"),
            Token::symbol(TokenKind::Add),
            Token::variable("z"),
            Token::symbol(TokenKind::CloseParenthesis),
            Token::symbol(TokenKind::Multiply),
            Token::variable("a"),
        ]
    }

    fn create_complex_tree() -> Node {
        let x = Node::new_variable("x".into());
        let y = Node::new_variable("y".into());
        let z = Node::new_variable("z".into());
        let a = Node::new_variable("a".into());
        let second_plus = Node::new_binary_addition(y, z);
        let star = Node::new_binary_multiplication(second_plus, a);
        Node::new_binary_addition(x, star)
    }
}
