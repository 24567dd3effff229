use caseledger::{AutomatedTestCase, TestCase, TestSuite};

/// The four-case regression suite: two manual cases followed by a Selenium
/// and a Playwright case
pub fn regression_suite() -> TestSuite {
    let mut suite = TestSuite::new("Regression Suite");
    suite.add_case(TestCase::new("TC001", "Login Validation", "Authentication"));
    suite.add_case(TestCase::new("TC002", "Logout Validation", "Authentication"));
    suite.add_case(AutomatedTestCase::new("TC003", "Add to Cart", "Cart", "Selenium"));
    suite.add_case(AutomatedTestCase::new(
        "TC004",
        "Payment Flow",
        "Checkout",
        "Playwright",
    ));
    suite
}
