//! The column contract: which header label feeds which [`Point`] field.
//!
//! [`FIELDS`] is the single source of truth. Each entry pairs a label with
//! a field kind, and the kind carries the setter for that field, so adding
//! a column is one line here.

use std::time::Duration;

use crate::models::Point;

/// How a cell is decoded, with the setter for the decoded value.
#[derive(Clone, Copy)]
pub enum FieldKind {
    /// Trimmed text, stored as-is.
    PlainText(fn(&mut Point, String)),
    /// Strict base-10 `u64`. Blank cells are an error.
    UnsignedInteger(fn(&mut Point, u64)),
    /// Duration expression, bare numbers read as milliseconds. Must be > 0.
    DurationWithUnitInference(fn(&mut Point, Duration)),
}

impl FieldKind {
    /// Short name used in the column listing.
    pub fn describe(&self) -> &'static str {
        match self {
            FieldKind::PlainText(_) => "text",
            FieldKind::UnsignedInteger(_) => "unsigned integer",
            FieldKind::DurationWithUnitInference(_) => "duration (default ms)",
        }
    }
}

impl std::fmt::Debug for FieldKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.describe())
    }
}

/// One row of the column contract.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    /// Exact header label, compared after trimming.
    pub label: &'static str,
    /// Field name used in error messages.
    pub name: &'static str,
    pub kind: FieldKind,
}

impl FieldSpec {
    const fn text(label: &'static str, name: &'static str, set: fn(&mut Point, String)) -> Self {
        Self {
            label,
            name,
            kind: FieldKind::PlainText(set),
        }
    }

    /// Whether the row is dropped when this field cannot be decoded.
    pub fn is_key(&self) -> bool {
        !matches!(self.kind, FieldKind::PlainText(_))
    }
}

/// Recognized columns, in record field order.
pub static FIELDS: [FieldSpec; 24] = [
    FieldSpec::text("序号", "sequence", |p, v| p.sequence = v),
    FieldSpec::text("事业部", "business unit", |p, v| p.business_unit = v),
    FieldSpec::text("产线", "production line", |p, v| p.production_line = v),
    FieldSpec::text("区域", "area", |p, v| p.area = v),
    FieldSpec::text("设备", "equipment", |p, v| p.equipment = v),
    FieldSpec::text("分部设备", "sub-equipment", |p, v| p.sub_equipment = v),
    FieldSpec::text("点位名称", "point name", |p, v| p.point_name = v),
    FieldSpec::text("传感器类型", "sensor type", |p, v| p.sensor_type = v),
    FieldSpec::text("数据类型", "data type", |p, v| p.data_type = v),
    FieldSpec::text("精度", "precision", |p, v| p.precision = v),
    FieldSpec::text("取值范围", "value range", |p, v| p.value_range = v),
    FieldSpec {
        label: "采集频率",
        name: "sampling frequency",
        kind: FieldKind::DurationWithUnitInference(|p, v| p.sampling_frequency = v),
    },
    FieldSpec::text("数据单位", "data unit", |p, v| p.data_unit = v),
    FieldSpec::text("数据源地址", "data source address", |p, v| p.data_source_address = v),
    FieldSpec::text("IO地址", "IO address", |p, v| p.io_address = v),
    FieldSpec::text("设备编号", "device code", |p, v| p.device_code = v),
    FieldSpec::text("设备附属编号", "device sub-code", |p, v| p.device_sub_code = v),
    FieldSpec {
        label: "点位编号",
        name: "point code",
        kind: FieldKind::UnsignedInteger(|p, v| p.point_code = v),
    },
    FieldSpec::text("点位额外编号", "point extra code", |p, v| p.point_extra_code = v),
    FieldSpec::text("分组编号", "group id", |p, v| p.group_id = v),
    FieldSpec::text("是否存储", "need store", |p, v| p.need_store = v),
    FieldSpec::text("是否推送", "need publish", |p, v| p.need_publish = v),
    FieldSpec::text("计算类型", "calculation type", |p, v| p.calculation_type = v),
    FieldSpec::text("推送主题", "publish topic", |p, v| p.publish_topic = v),
];

/// Look up a field by its header label.
pub fn field_for_label(label: &str) -> Option<&'static FieldSpec> {
    FIELDS.iter().find(|f| f.label == label)
}
