//! Property-based tests for the schema mapping layer
//!
//! These tests verify that emitted constraint schemas rebuild into
//! constraints with the same acceptance behavior, across generated
//! parameter ranges.

use proptest::prelude::*;
use strukt_core::{integer, number, string, Field, Value};
use strukt_schemas::{field_from_schema, field_to_schema, Definitions};

fn round_trip(field: &Field) -> Field {
    let mut definitions = Definitions::new();
    let schema = field_to_schema(field, &mut definitions).unwrap();
    field_from_schema(&schema, &definitions).unwrap()
}

proptest! {
    #[test]
    fn prop_integer_bounds_survive_round_trip(
        min in -100i64..0,
        max in 0i64..100,
        value in -200i64..200,
    ) {
        let field: Field = integer().minimum(min).maximum(max).into();
        let rebuilt = round_trip(&field);
        let input = Value::Int(value);
        prop_assert_eq!(
            field.validate("n", &input).is_ok(),
            rebuilt.validate("n", &input).is_ok()
        );
    }

    #[test]
    fn prop_multiples_survive_round_trip(m in 1i64..20, value in -200i64..200) {
        let field: Field = number().multiples_of(m).into();
        let rebuilt = round_trip(&field);
        let input = Value::Int(value);
        prop_assert_eq!(
            field.validate("n", &input).is_ok(),
            rebuilt.validate("n", &input).is_ok()
        );
    }

    #[test]
    fn prop_string_lengths_survive_round_trip(
        min in 0usize..5,
        max in 5usize..15,
        s in "[a-z]{0,20}",
    ) {
        let field: Field = string().min_length(min).max_length(max).into();
        let rebuilt = round_trip(&field);
        let input = Value::Str(s);
        prop_assert_eq!(
            field.validate("s", &input).is_ok(),
            rebuilt.validate("s", &input).is_ok()
        );
    }

    #[test]
    fn prop_rebuilt_constraint_emits_the_same_schema(
        min in -100i64..0,
        max in 0i64..100,
    ) {
        let field: Field = number().minimum(min).maximum(max).into();
        let mut definitions = Definitions::new();
        let schema = field_to_schema(&field, &mut definitions).unwrap();
        let rebuilt = field_from_schema(&schema, &definitions).unwrap();
        let mut second_definitions = Definitions::new();
        let second = field_to_schema(&rebuilt, &mut second_definitions).unwrap();
        prop_assert_eq!(schema, second);
    }
}
