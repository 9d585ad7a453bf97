mod support;

mod dashboard_tests;
