use crate::interpreter::operator::{BinaryOperator, UnaryOperator};
use crate::interpreter::syntax::expression_tree::Node;

/// If a method is not implemented, the default implementation will continue in a pre-order
/// traversal of the tree.
pub(crate) trait SyntaxVisitor: Sized {
    fn visit_number(&mut self, _value: f64) {}
    fn visit_variable(&mut self, _name: &str) {}
    fn visit_binary_operation(
        &mut self,
        _operation: &BinaryOperator,
        left_operand: &Node,
        right_operand: &Node,
    ) {
        walk_binary_operation(self, left_operand, right_operand)
    }
    fn visit_unary_operation(&mut self, _operation: &UnaryOperator, operand: &Node) {
        walk_unary_operation(self, operand)
    }
}

pub(crate) fn walk_binary_operation(
    visitor: &mut impl SyntaxVisitor,
    left_operand: &Node,
    right_operand: &Node,
) {
    left_operand.accept(visitor);
    right_operand.accept(visitor);
}

pub(crate) fn walk_unary_operation(visitor: &mut impl SyntaxVisitor, operand: &Node) {
    operand.accept(visitor);
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn create_complex_tree() -> Node {
        let a = Node::new_variable("a".into());
        let b = Node::new_variable("b".into());
        let c = Node::new_number(2.5);
        let d = Node::new_variable("d".into());
        let second_plus = Node::new_binary_addition(b, Node::new_negation(c));
        let star = Node::new_binary_multiplication(second_plus, d);
        Node::new_binary_addition(a, star)
    }

    struct PrePostPrintVisitor {
        prints: Vec<String>,
    }

    impl SyntaxVisitor for PrePostPrintVisitor {
        fn visit_number(&mut self, value: f64) {
            self.prints.push(format!("{}", value))
        }
        fn visit_variable(&mut self, name: &str) {
            self.prints.push(name.to_string())
        }
        fn visit_binary_operation(
            &mut self,
            operation: &BinaryOperator,
            left_operand: &Node,
            right_operand: &Node,
        ) {
            self.prints.push(format!("{:?}", operation));
            walk_binary_operation(self, left_operand, right_operand);
            self.prints.push(format!("exit {:?}", operation));
        }
        fn visit_unary_operation(&mut self, operation: &UnaryOperator, operand: &Node) {
            self.prints.push(format!("{:?}", operation));
            walk_unary_operation(self, operand);
            self.prints.push(format!("exit {:?}", operation));
        }
    }

    #[test]
    fn walk_tree_prints_all_nodes_in_tree_in_pre_and_post_orders() {
        let root = create_complex_tree();
        let mut visitor = PrePostPrintVisitor { prints: vec![] };
        root.accept(&mut visitor);
        assert_eq!(
            visitor.prints,
            [
                "Add",
                "a",
                "Multiply",
                "Add",
                "b",
                "Negate",
                "2.5",
                "exit Negate",
                "exit Add",
                "d",
                "exit Multiply",
                "exit Add",
            ]
        )
    }

    #[derive(Default)]
    struct LeafCounter {
        leaves: usize,
    }

    impl SyntaxVisitor for LeafCounter {
        fn visit_number(&mut self, _value: f64) {
            self.leaves += 1;
        }
        fn visit_variable(&mut self, _name: &str) {
            self.leaves += 1;
        }
    }

    #[test]
    fn default_methods_walk_into_every_leaf() {
        let mut visitor = LeafCounter::default();
        create_complex_tree().accept(&mut visitor);
        assert_eq!(visitor.leaves, 4);
    }
}
