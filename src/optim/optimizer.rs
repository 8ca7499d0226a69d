//! Optimizer trait

use std::fmt;

/// Handle to an optimization algorithm.
pub trait Optimizer: Send + fmt::Debug {
    /// Algorithm name, lowercase (`sgd`, `adam`, `adamw`)
    fn name(&self) -> &'static str;

    /// Get learning rate
    fn lr(&self) -> f32;

    /// Set learning rate
    fn set_lr(&mut self, lr: f32);
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Minimal optimizer implementation for exercising the trait object
    #[derive(Debug)]
    struct TestOptimizer {
        learning_rate: f32,
    }

    impl Optimizer for TestOptimizer {
        fn name(&self) -> &'static str {
            "test"
        }

        fn lr(&self) -> f32 {
            self.learning_rate
        }

        fn set_lr(&mut self, lr: f32) {
            self.learning_rate = lr;
        }
    }

    #[test]
    fn test_boxed_optimizer_set_lr() {
        let mut opt: Box<dyn Optimizer> = Box::new(TestOptimizer { learning_rate: 0.1 });
        assert_eq!(opt.name(), "test");
        opt.set_lr(0.01);
        assert_eq!(opt.lr(), 0.01);
    }
}
