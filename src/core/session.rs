//! 会话状态：当前行程与「生成中」标记
//!
//! 每个会话一份，由界面事件处理函数按引用传递；最多保留一份行程，不留历史。

use serde::Serialize;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SessionState {
    trip_plan: Option<String>,
    generating: bool,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// 开始生成；防重入由调用方负责（先查 is_generating）
    pub fn begin_generation(&mut self) {
        self.generating = true;
    }

    /// 生成结束：覆盖当前行程并清除生成标记
    pub fn complete_generation(&mut self, result: impl Into<String>) {
        self.trip_plan = Some(result.into());
        self.generating = false;
    }

    /// 清空行程，不影响 generating
    pub fn clear(&mut self) {
        self.trip_plan = None;
    }

    pub fn trip_plan(&self) -> Option<&str> {
        self.trip_plan.as_deref()
    }

    pub fn is_generating(&self) -> bool {
        self.generating
    }

    pub fn has_plan(&self) -> bool {
        self.trip_plan.is_some()
    }
}
