#[cfg(test)]
mod tests {
    use crate::error::ProxyError;
    use crate::reshape::{reshape, reshape_checked};
    use crate::types::{Method, NormalizedResult, RawRow, ReadinessState, Statement, Value};

    fn row(id: i64, name: &str) -> RawRow {
        RawRow::new(
            vec!["id".into(), "name".into()],
            vec![Value::Integer(id), Value::Text(name.into())],
        )
    }

    #[test]
    fn reshape_all_keeps_every_row_in_order() {
        let rows = vec![row(1, "alice"), row(2, "bob"), row(3, "claire")];
        for method in [Method::All, Method::Run, Method::Values] {
            let result = reshape(rows.clone(), method);
            let rows = result.rows().expect("rows shape");
            assert_eq!(rows.len(), 3);
            assert_eq!(rows[0][1], Value::Text("alice".into()));
            assert_eq!(rows[2][0], Value::Integer(3));
        }
    }

    #[test]
    fn reshape_all_on_empty_input_is_empty_rows() {
        assert_eq!(reshape(Vec::new(), Method::All), NormalizedResult::Rows(Vec::new()));
    }

    #[test]
    fn reshape_get_without_rows_is_empty_row() {
        assert_eq!(reshape(Vec::new(), Method::Get), NormalizedResult::Row(Vec::new()));
    }

    #[test]
    fn reshape_get_takes_only_first_row() {
        let result = reshape(vec![row(7, "dana"), row(8, "eve")], Method::Get);
        assert_eq!(
            result,
            NormalizedResult::Row(vec![Value::Integer(7), Value::Text("dana".into())])
        );
    }

    #[test]
    fn reshape_checked_rejects_ragged_rows() {
        let ragged = RawRow::new(vec!["id".into()], vec![Value::Integer(1), Value::Null]);
        let err = reshape_checked(vec![row(1, "a"), ragged], Method::All).unwrap_err();
        assert!(matches!(err, ProxyError::ProtocolViolation(_)));
    }

    #[test]
    fn raw_row_uses_executor_field_names() {
        let json = r#"{"columns":["id","title"],"rows":[1,"write docs"]}"#;
        let parsed: RawRow = serde_json::from_str(json).expect("parse");
        assert_eq!(parsed.values, vec![Value::Integer(1), Value::Text("write docs".into())]);
    }

    #[test]
    fn values_decode_from_plain_json_scalars() {
        let parsed: Vec<Value> = serde_json::from_str(r#"[null, true, 3, 2.5, "x"]"#).expect("parse");
        assert_eq!(
            parsed,
            vec![
                Value::Null,
                Value::Bool(true),
                Value::Integer(3),
                Value::Real(2.5),
                Value::Text("x".into()),
            ]
        );
    }

    #[test]
    fn blob_values_travel_as_base64() {
        let value = Value::from_blob(&[0xde, 0xad, 0xbe, 0xef]);
        assert_eq!(value.as_str(), Some("3q2+7w=="));
        assert_eq!(value.as_blob(), Some(vec![0xde, 0xad, 0xbe, 0xef]));
    }

    #[test]
    fn statement_method_defaults_to_all() {
        let stmt: Statement = serde_json::from_str(r#"{"sql":"select 1"}"#).expect("parse");
        assert_eq!(stmt.method, Method::All);
        assert!(stmt.params.is_empty());
        assert_eq!("GET".parse::<Method>(), Ok(Method::Get));
    }

    #[test]
    fn normalized_result_serializes_with_row_keys() {
        let get = serde_json::to_string(&NormalizedResult::Row(vec![Value::Integer(1)])).unwrap();
        assert_eq!(get, r#"{"row":[1]}"#);
        let all = serde_json::to_string(&NormalizedResult::Rows(vec![vec![Value::Null]])).unwrap();
        assert_eq!(all, r#"{"rows":[[null]]}"#);
    }

    #[test]
    fn readiness_state_bits_roundtrip() {
        for state in [ReadinessState::Unknown, ReadinessState::NotReady, ReadinessState::Ready] {
            assert_eq!(ReadinessState::from_bits(state.to_bits()), state);
        }
        assert_eq!(ReadinessState::Unknown.as_bool(), None);
        assert_eq!(ReadinessState::from_ready(true).as_bool(), Some(true));
    }
}
