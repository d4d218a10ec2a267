// ==========================================
// 车队维保配件对账系统 - 计量模式判定引擎
// ==========================================
// 职责: 序列化件/散装件判定 + 序列化数量校验
// 红线: 序列化判定只看 part_item_id 是否存在,
//       业务逻辑深处不得自行探测可选字段（判定集中于此）
// ==========================================

use crate::domain::types::UnitMode;
use crate::engine::error::{EngineError, EngineResult};
use crate::QTY_EPSILON;

// ==========================================
// UnitModeClassifier - 计量模式判定引擎
// ==========================================
pub struct UnitModeClassifier;

impl UnitModeClassifier {
    /// 判定计量模式
    ///
    /// part_item_id 存在 ⇒ SERIALIZED, 否则 BULK
    pub fn classify(part_item_id: Option<&str>) -> UnitMode {
        match part_item_id {
            Some(_) => UnitMode::Serialized,
            None => UnitMode::Bulk,
        }
    }

    /// 写入边界的数量校验
    ///
    /// 序列化件数量必须等于 1; 散装件数量必须 > 0。
    /// 违规输入在进入台账之前即被拒绝。
    ///
    /// # 错误
    /// - Validation: 数量违反所属计量模式的约束
    pub fn validate_quantity(mode: UnitMode, qty: f64) -> EngineResult<()> {
        match mode {
            UnitMode::Serialized => {
                if (qty - 1.0).abs() > QTY_EPSILON {
                    return Err(EngineError::Validation(format!(
                        "序列化件数量必须等于 1, 实际为 {}",
                        qty
                    )));
                }
            }
            UnitMode::Bulk => {
                if qty <= QTY_EPSILON {
                    return Err(EngineError::Validation(format!(
                        "散装件数量必须大于 0, 实际为 {}",
                        qty
                    )));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_by_part_item_id_presence() {
        assert_eq!(UnitModeClassifier::classify(Some("S1")), UnitMode::Serialized);
        assert_eq!(UnitModeClassifier::classify(None), UnitMode::Bulk);
    }

    #[test]
    fn test_serialized_qty_must_be_one() {
        assert!(UnitModeClassifier::validate_quantity(UnitMode::Serialized, 1.0).is_ok());
        assert!(matches!(
            UnitModeClassifier::validate_quantity(UnitMode::Serialized, 2.0),
            Err(EngineError::Validation(_))
        ));
        assert!(matches!(
            UnitModeClassifier::validate_quantity(UnitMode::Serialized, 0.0),
            Err(EngineError::Validation(_))
        ));
    }

    #[test]
    fn test_bulk_qty_must_be_positive() {
        assert!(UnitModeClassifier::validate_quantity(UnitMode::Bulk, 0.5).is_ok());
        assert!(matches!(
            UnitModeClassifier::validate_quantity(UnitMode::Bulk, 0.0),
            Err(EngineError::Validation(_))
        ));
        assert!(matches!(
            UnitModeClassifier::validate_quantity(UnitMode::Bulk, -1.0),
            Err(EngineError::Validation(_))
        ));
    }
}
