//! 文本渲染与下载
//!
//! 行程摘要（路线、天数、预算、风格、兴趣、日期）、表单概览、下载文件命名与写盘。

use std::path::{Path, PathBuf};

use crate::trip::{TripForm, TripRequest, DATE_LABEL_FORMAT};

/// 生成结果上方的摘要
pub fn trip_summary(request: &TripRequest) -> String {
    format!(
        "Route:        {} → {}\n\
         Duration:     {} days\n\
         Budget:       {}\n\
         Style:        {}\n\
         Interests:    {}\n\
         Travel Dates: {} - {}",
        request.origin(),
        request.destination(),
        request.duration_days(),
        request.budget(),
        request.travel_style(),
        request.interests_list(),
        request.start_label(),
        request.end_label(),
    )
}

/// 表单当前值（未校验，可能为空）
pub fn form_overview(form: &TripForm) -> String {
    let interests = if form.interests.is_empty() {
        "(none)".to_string()
    } else {
        form.interests.join(", ")
    };
    format!(
        "origin:      {}\n\
         destination: {}\n\
         start:       {}\n\
         end:         {}  ({} days)\n\
         interests:   {}\n\
         budget:      {}\n\
         style:       {}",
        form.origin,
        form.destination,
        form.start_date.format(DATE_LABEL_FORMAT),
        form.end_date.format(DATE_LABEL_FORMAT),
        form.duration_days(),
        interests,
        form.budget,
        form.travel_style,
    )
}

/// 下载文件名：trip_plan_{目的地小写、空格转下划线}_{YYYYMMDD}.txt
pub fn download_file_name(request: &TripRequest) -> String {
    format!(
        "trip_plan_{}_{}.txt",
        request.destination().to_lowercase().replace(' ', "_"),
        request.start_date().format("%Y%m%d"),
    )
}

/// 将行程原文写入 dir 下，目录不存在时创建
pub fn save_plan(dir: &Path, request: &TripRequest, plan: &str) -> std::io::Result<PathBuf> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(download_file_name(request));
    std::fs::write(&path, plan)?;
    tracing::info!("Trip plan saved to {}", path.display());
    Ok(path)
}
