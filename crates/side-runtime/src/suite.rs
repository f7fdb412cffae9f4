use side_core::Outcome;

use crate::context::ExecutionContext;
use crate::testcase::TestCase;

/// Ordered set of test cases whose verdicts fold with the same max-severity
/// rule as per-command outcomes.
///
/// An aborted case is terminal only for that case; the suite always runs the
/// remaining cases. The shared context lets the variable store span cases,
/// while each case's runner still resets the collection store and the log
/// sink, so the log reports the most recent case only.
#[derive(Debug)]
pub struct TestSuite {
    name: String,
    cases: Vec<TestCase>,
    result: Outcome,
}

impl TestSuite {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cases: Vec::new(),
            result: Outcome::Unexecuted,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn add_case(&mut self, case: TestCase) {
        self.cases.push(case);
    }

    pub fn cases(&self) -> &[TestCase] {
        &self.cases
    }

    pub fn result(&self) -> &Outcome {
        &self.result
    }

    pub fn execute(&mut self, context: &mut ExecutionContext) -> Outcome {
        if self.cases.is_empty() {
            self.result = Outcome::Success;
            return self.result.clone();
        }
        for case in &mut self.cases {
            let outcome = case.execute(context);
            self.result = self.result.clone().combine(outcome);
        }
        self.result.clone()
    }
}
