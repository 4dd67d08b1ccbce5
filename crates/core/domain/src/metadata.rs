/// 全时段 timespan 的起止标记。
pub const SPAN_START_ALL: &str = "-INF";
pub const SPAN_END_ALL: &str = "+INF";

/// 单个元数据字段（可多值）。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataField {
    pub name: String,
    pub values: Vec<String>,
}

impl MetadataField {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            values: vec![value.into()],
        }
    }

    /// 第一个取值（比较时只看首值）。
    pub fn first_value(&self) -> Option<&str> {
        self.values.first().map(String::as_str)
    }
}

/// 元数据时间段。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timespan {
    pub start: String,
    pub end: String,
    pub fields: Vec<MetadataField>,
}

impl Timespan {
    /// 覆盖整个条目（非时基元数据）的时间段。
    pub fn whole_item(fields: Vec<MetadataField>) -> Self {
        Self {
            start: SPAN_START_ALL.to_string(),
            end: SPAN_END_ALL.to_string(),
            fields,
        }
    }

    pub fn is_whole_item(&self) -> bool {
        self.start == SPAN_START_ALL && self.end == SPAN_END_ALL
    }
}

/// 待提交的元数据文档（页面表单内容）。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetadataDocument {
    pub timespans: Vec<Timespan>,
}

impl MetadataDocument {
    pub fn new(timespans: Vec<Timespan>) -> Self {
        Self { timespans }
    }

    /// 第一个全时段 timespan。
    pub fn whole_item_span(&self) -> Option<&Timespan> {
        self.timespans.iter().find(|span| span.is_whole_item())
    }
}

/// 条目当前的自定义元数据。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemMetadata {
    pub fields: Vec<MetadataField>,
}

impl ItemMetadata {
    pub fn new(fields: Vec<MetadataField>) -> Self {
        Self { fields }
    }

    pub fn field_by_name(&self, name: &str) -> Option<&MetadataField> {
        self.fields.iter().find(|field| field.name == name)
    }
}

/// 即将被修改的字段。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldChange {
    pub field: String,
    pub old_value: String,
    pub new_value: String,
}
