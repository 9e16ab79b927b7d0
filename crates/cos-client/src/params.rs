//! Request parameters
//!
//! One immutable value per call. Every field the protocol knows is listed and
//! each call kind fills only its own subset.

use crate::types::ListDirParams;

/// Parameters for a single signed call
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct Params {
    pub op: &'static str,
    pub biz_attr: Option<String>,
    pub slice_size: Option<u64>,
    pub session: Option<String>,
    pub sha: Option<String>,
    pub offset: Option<u64>,
    pub filesize: Option<u64>,
    pub num: Option<u32>,
    pub pattern: Option<&'static str>,
    pub order: Option<u8>,
    pub context: Option<String>,
}

impl Params {
    fn op(op: &'static str) -> Self {
        Self {
            op,
            ..Default::default()
        }
    }

    pub fn create(biz_attr: &str) -> Self {
        Self {
            biz_attr: Some(biz_attr.to_string()),
            ..Self::op("create")
        }
    }

    pub fn update(biz_attr: &str) -> Self {
        Self {
            biz_attr: Some(biz_attr.to_string()),
            ..Self::op("update")
        }
    }

    pub fn stat() -> Self {
        Self::op("stat")
    }

    pub fn delete() -> Self {
        Self::op("delete")
    }

    pub fn list(list: &ListDirParams) -> Self {
        Self {
            num: Some(list.num),
            pattern: Some(list.pattern.as_str()),
            order: Some(list.order as u8),
            context: Some(list.context.clone()),
            ..Self::op("list")
        }
    }

    /// Simple whole-file upload
    pub fn upload(biz_attr: &str, sha: String) -> Self {
        Self {
            biz_attr: Some(biz_attr.to_string()),
            sha: Some(sha),
            ..Self::op("upload")
        }
    }

    /// First call of a resumable upload; always carries `biz_attr` and `session`
    pub fn first_slice(
        biz_attr: &str,
        slice_size: u64,
        session: &str,
        sha: String,
        filesize: u64,
    ) -> Self {
        Self {
            biz_attr: Some(biz_attr.to_string()),
            slice_size: Some(slice_size),
            session: Some(session.to_string()),
            sha: Some(sha),
            filesize: Some(filesize),
            ..Self::op("upload_slice")
        }
    }

    /// One chunk of a resumable upload
    pub fn slice(session: &str, sha: String, offset: u64) -> Self {
        Self {
            session: Some(session.to_string()),
            sha: Some(sha),
            offset: Some(offset),
            ..Self::op("upload_slice")
        }
    }

    /// The populated `(key, value)` pairs, every value rendered as a string
    pub fn fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![("op", self.op.to_string())];
        let mut push = |key: &'static str, value: Option<String>| {
            if let Some(value) = value {
                fields.push((key, value));
            }
        };

        push("biz_attr", self.biz_attr.clone());
        push("slice_size", self.slice_size.map(|v| v.to_string()));
        push("session", self.session.clone());
        push("sha", self.sha.clone());
        push("offset", self.offset.map(|v| v.to_string()));
        push("filesize", self.filesize.map(|v| v.to_string()));
        push("num", self.num.map(|v| v.to_string()));
        push("pattern", self.pattern.map(str::to_string));
        push("order", self.order.map(|v| v.to_string()));
        push("context", self.context.clone());

        fields
    }

    /// The fields as a JSON object of strings
    pub fn to_json(&self) -> serde_json::Value {
        self.fields()
            .into_iter()
            .map(|(k, v)| (k.to_string(), serde_json::Value::String(v)))
            .collect::<serde_json::Map<_, _>>()
            .into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ListOrder, ListPattern};

    fn keys(params: &Params) -> Vec<&'static str> {
        params.fields().into_iter().map(|(k, _)| k).collect()
    }

    #[test]
    fn test_first_slice_carries_empty_session_and_attr() {
        let params = Params::first_slice("", 512, "", "ABC".into(), 2000);
        assert_eq!(
            params.fields(),
            vec![
                ("op", "upload_slice".to_string()),
                ("biz_attr", String::new()),
                ("slice_size", "512".to_string()),
                ("session", String::new()),
                ("sha", "ABC".to_string()),
                ("filesize", "2000".to_string()),
            ]
        );
    }

    #[test]
    fn test_slice_carries_only_chunk_fields() {
        let params = Params::slice("s1", "DEF".into(), 1024);
        assert_eq!(keys(&params), vec!["op", "session", "sha", "offset"]);
    }

    #[test]
    fn test_list_params() {
        let list = ListDirParams::default()
            .num(10)
            .pattern(ListPattern::FileOnly)
            .order(ListOrder::Descending);
        let params = Params::list(&list);
        assert_eq!(
            params.fields(),
            vec![
                ("op", "list".to_string()),
                ("num", "10".to_string()),
                ("pattern", "eListFileOnly".to_string()),
                ("order", "1".to_string()),
                ("context", String::new()),
            ]
        );
    }

    #[test]
    fn test_json_body_is_all_strings() {
        let json = Params::update("attr").to_json();
        assert_eq!(json, serde_json::json!({"op": "update", "biz_attr": "attr"}));
        assert_eq!(Params::delete().to_json(), serde_json::json!({"op": "delete"}));
    }
}
