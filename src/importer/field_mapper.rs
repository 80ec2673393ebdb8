// ==========================================
// 房源目标达成分析系统 - 字段映射器实现
// ==========================================
// 职责: 源列名 → 标准字段映射 + 类型转换
// 同时接受标准列名、抽取查询原始列名与葡语重命名列名
// 红线: 无法解析的数值降级为空值并记录 DQ 警告, 不中断导入
// ==========================================

use crate::domain::listing::{LocationRecord, MinPriceRecord, PerformanceRecord, PriceRecord};
use crate::importer::data_cleaner::DataCleaner;
use crate::importer::dq_report::DqReport;
use crate::importer::extract_trait::{
    DataCleaner as DataCleanerTrait, FieldMapper as FieldMapperTrait, RawRow,
};
use crate::importer::error::ImportResult;
use chrono::NaiveDate;

// ==========================================
// 标准字段名 → 可接受的源列名
// ==========================================
pub mod field_aliases {
    pub const LISTING_ID: &[&str] = &["listing_id", "listing"];
    pub const GROUP_NAME: &[&str] = &["group_name", "categoria", "category"];
    pub const BLOCKED_DAYS: &[&str] = &["blocked_days", "num_listing_blocked", "dias_bloqueados"];
    pub const DAYS_ACTIVE: &[&str] = &["days_active", "n_days_status", "dias_ativo"];
    pub const REVENUE_MONTH: &[&str] = &["revenue_month", "listing_fat", "faturamento_mes"];
    pub const N_COMPETITORS: &[&str] = &["n_competitors", "n_concorrentes"];
    pub const TARGET: &[&str] = &["target", "meta_value", "meta"];
    pub const YEAR_MONTH: &[&str] = &["year_month", "mes_ano"];
    pub const OCCUPANCY_RATE: &[&str] = &["occupancy_rate", "to_listings"];
    pub const COMPETITOR_OCCUPANCY_RATE: &[&str] =
        &["competitor_occupancy_rate", "to_competitors", "to_concorrentes"];
    pub const DAYS_OCCUPIED: &[&str] = &["days_occupied", "dias_ocupados"];
    pub const TOTAL_DAYS: &[&str] = &["total_days", "total_dias"];
    pub const EXECUTION_DATE: &[&str] = &["execution_date", "data_da_execucao"];

    pub const AVG_PRICE_OCCUPIED: &[&str] = &["avg_price_occupied", "media_preco_ocupado"];
    pub const AVG_PRICE_AVAILABLE: &[&str] = &["avg_price_available", "media_preco_disponivel"];
    pub const DAYS_AVAILABLE_RAW: &[&str] = &["days_available_raw", "ocupacao_ainda_disponivel"];

    pub const PORTFOLIO: &[&str] = &["portfolio", "carteira"];
    pub const STATE: &[&str] = &["state", "estado"];
    pub const CITY: &[&str] = &["city", "cidade"];
    pub const NEIGHBORHOOD: &[&str] = &["neighborhood", "Bairro", "bairro"];

    pub const MIN_PRICE_DAYS: &[&str] = &["min_price_days", "n_dates_special_price", "dias_pmin"];
}

/// 抽取表名称（用于 DQ 报告）
pub mod extract_labels {
    pub const PERFORMANCE: &str = "performance";
    pub const PRICE: &str = "price";
    pub const LOCATION: &str = "location";
    pub const MIN_PRICE: &str = "min_price";
}

pub struct FieldMapper {
    cleaner: DataCleaner,
}

impl FieldMapper {
    pub fn new() -> Self {
        Self {
            cleaner: DataCleaner,
        }
    }

    /// 按别名顺序取第一个存在的列
    fn lookup<'a>(row: &'a RawRow, aliases: &[&str]) -> Option<&'a str> {
        aliases
            .iter()
            .find_map(|alias| row.get(*alias))
            .map(String::as_str)
    }

    fn get_string(&self, row: &RawRow, aliases: &[&str]) -> Option<String> {
        self.cleaner.clean_text(Self::lookup(row, aliases))
    }

    /// 读取主键; 缺失时记录丢弃
    fn listing_id(
        &self,
        row: &RawRow,
        row_number: usize,
        extract: &str,
        dq: &mut DqReport,
    ) -> Option<String> {
        let id = self.get_string(row, field_aliases::LISTING_ID);
        if id.is_none() {
            dq.drop_row(extract, row_number, "缺少 listing_id, 行已丢弃");
        }
        id
    }

    fn decimal(&self, cx: &mut RowContext<'_>, field: &str, aliases: &[&str]) -> Option<f64> {
        let parsed = self
            .cleaner
            .parse_decimal(Self::lookup(cx.row, aliases), field, cx.row_number);
        cx.degrade(field, parsed)
    }

    fn integer(&self, cx: &mut RowContext<'_>, field: &str, aliases: &[&str]) -> Option<i64> {
        let parsed = self
            .cleaner
            .parse_integer(Self::lookup(cx.row, aliases), field, cx.row_number);
        cx.degrade(field, parsed)
    }

    fn date(&self, cx: &mut RowContext<'_>, field: &str, aliases: &[&str]) -> Option<NaiveDate> {
        let parsed = self
            .cleaner
            .parse_date(Self::lookup(cx.row, aliases), field, cx.row_number);
        cx.degrade(field, parsed)
    }
}

impl Default for FieldMapper {
    fn default() -> Self {
        Self::new()
    }
}

/// 单行映射上下文（DQ 记录需要的定位信息）
struct RowContext<'a> {
    row: &'a RawRow,
    row_number: usize,
    extract: &'static str,
    listing_id: &'a str,
    dq: &'a mut DqReport,
}

impl RowContext<'_> {
    /// 解析失败 → None + DQ 警告
    fn degrade<T>(&mut self, field: &str, parsed: ImportResult<Option<T>>) -> Option<T> {
        match parsed {
            Ok(value) => value,
            Err(err) => {
                self.dq.warn(
                    self.extract,
                    self.row_number,
                    Some(self.listing_id),
                    field,
                    err.to_string(),
                );
                None
            }
        }
    }
}

impl FieldMapperTrait for FieldMapper {
    fn map_performance(
        &self,
        row: &RawRow,
        row_number: usize,
        dq: &mut DqReport,
    ) -> Option<PerformanceRecord> {
        use field_aliases::*;
        let extract = extract_labels::PERFORMANCE;
        let listing_id = self.listing_id(row, row_number, extract, dq)?;
        let mut cx = RowContext {
            row,
            row_number,
            extract,
            listing_id: &listing_id,
            dq,
        };

        Some(PerformanceRecord {
            listing_id: listing_id.clone(),
            group_name: self.get_string(row, GROUP_NAME),
            blocked_days: self.integer(&mut cx, "blocked_days", BLOCKED_DAYS),
            days_active: self.integer(&mut cx, "days_active", DAYS_ACTIVE),
            revenue_month: self.decimal(&mut cx, "revenue_month", REVENUE_MONTH),
            n_competitors: self.integer(&mut cx, "n_competitors", N_COMPETITORS),
            target: self.decimal(&mut cx, "target", TARGET),
            year_month: self.get_string(row, YEAR_MONTH),
            occupancy_rate: self.decimal(&mut cx, "occupancy_rate", OCCUPANCY_RATE),
            competitor_occupancy_rate: self.decimal(
                &mut cx,
                "competitor_occupancy_rate",
                COMPETITOR_OCCUPANCY_RATE,
            ),
            days_occupied: self.integer(&mut cx, "days_occupied", DAYS_OCCUPIED),
            total_days: self.integer(&mut cx, "total_days", TOTAL_DAYS),
            execution_date: self.date(&mut cx, "execution_date", EXECUTION_DATE),
        })
    }

    fn map_price(&self, row: &RawRow, row_number: usize, dq: &mut DqReport) -> Option<PriceRecord> {
        use field_aliases::*;
        let extract = extract_labels::PRICE;
        let listing_id = self.listing_id(row, row_number, extract, dq)?;
        let mut cx = RowContext {
            row,
            row_number,
            extract,
            listing_id: &listing_id,
            dq,
        };

        let avg_price_occupied = self.decimal(&mut cx, "avg_price_occupied", AVG_PRICE_OCCUPIED);
        let avg_price_available = self.decimal(&mut cx, "avg_price_available", AVG_PRICE_AVAILABLE);
        let days_available_raw = self.integer(&mut cx, "days_available_raw", DAYS_AVAILABLE_RAW);
        Some(PriceRecord {
            listing_id,
            avg_price_occupied,
            avg_price_available,
            days_available_raw,
        })
    }

    fn map_location(
        &self,
        row: &RawRow,
        row_number: usize,
        dq: &mut DqReport,
    ) -> Option<LocationRecord> {
        use field_aliases::*;
        let listing_id = self.listing_id(row, row_number, extract_labels::LOCATION, dq)?;
        Some(LocationRecord {
            listing_id,
            portfolio: self.get_string(row, PORTFOLIO),
            state: self.get_string(row, STATE),
            city: self.get_string(row, CITY),
            neighborhood: self.get_string(row, NEIGHBORHOOD),
        })
    }

    fn map_min_price(
        &self,
        row: &RawRow,
        row_number: usize,
        dq: &mut DqReport,
    ) -> Option<MinPriceRecord> {
        let extract = extract_labels::MIN_PRICE;
        let listing_id = self.listing_id(row, row_number, extract, dq)?;
        let mut cx = RowContext {
            row,
            row_number,
            extract,
            listing_id: &listing_id,
            dq,
        };
        let min_price_days = self.integer(&mut cx, "min_price_days", field_aliases::MIN_PRICE_DAYS);
        Some(MinPriceRecord {
            listing_id,
            min_price_days,
        })
    }
}
