// nav.rs — 导航交互状态（菜单开合 + 吸顶头部）
//
// 原页面里这些状态挂在 DOM class 上；这里收进一个普通结构体，
// UI 层每帧按当前状态绘制，事件直接调用对应方法。

/// 滚动超过该阈值后头部收紧（严格大于）。
pub const HEADER_SCROLL_THRESHOLD: f32 = 50.0;

/// 头部上下内边距：展开 / 收紧。
pub const HEADER_PADDING_EXPANDED: f32 = 20.0;
pub const HEADER_PADDING_COMPACT: f32 = 10.0;

#[derive(Debug, Clone, Copy, Default)]
pub struct NavigationController {
    menu_open: bool,
    header_compact: bool,
}

impl NavigationController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn menu_open(&self) -> bool {
        self.menu_open
    }

    pub fn header_compact(&self) -> bool {
        self.header_compact
    }

    /// 汉堡按钮：每次点击翻转，不做防抖。
    pub fn toggle_menu(&mut self) {
        self.menu_open = !self.menu_open;
    }

    /// 点击任意导航链接后无条件收起菜单（已收起时为空操作）。
    pub fn link_clicked(&mut self) {
        self.menu_open = false;
    }

    /// 每次滚动都重新判定，赋值本身幂等，不需要防抖。
    pub fn on_scroll(&mut self, offset: f32) {
        self.header_compact = offset > HEADER_SCROLL_THRESHOLD;
    }

    pub fn header_padding(&self) -> f32 {
        if self.header_compact {
            HEADER_PADDING_COMPACT
        } else {
            HEADER_PADDING_EXPANDED
        }
    }

    /// 收紧状态下头部带投影。
    pub fn header_has_shadow(&self) -> bool {
        self.header_compact
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn menu_toggle_parity() {
        // 奇数次点击后打开，偶数次后关闭
        let mut nav = NavigationController::new();
        for n in 1..=10 {
            nav.toggle_menu();
            assert_eq!(nav.menu_open(), n % 2 == 1, "after {} clicks", n);
        }
    }

    #[test]
    fn link_click_always_closes() {
        let mut nav = NavigationController::new();
        nav.link_clicked();
        assert!(!nav.menu_open());

        nav.toggle_menu();
        assert!(nav.menu_open());
        nav.link_clicked();
        assert!(!nav.menu_open());
    }

    #[test]
    fn header_threshold_is_strict() {
        let mut nav = NavigationController::new();

        nav.on_scroll(0.0);
        assert!(!nav.header_compact());
        assert_eq!(nav.header_padding(), HEADER_PADDING_EXPANDED);
        assert!(!nav.header_has_shadow());

        // 边界值 50 仍算展开
        nav.on_scroll(HEADER_SCROLL_THRESHOLD);
        assert!(!nav.header_compact());

        nav.on_scroll(HEADER_SCROLL_THRESHOLD + 0.5);
        assert!(nav.header_compact());
        assert_eq!(nav.header_padding(), HEADER_PADDING_COMPACT);
        assert!(nav.header_has_shadow());

        // 回滚到顶部后恢复展开
        nav.on_scroll(3.0);
        assert!(!nav.header_compact());
    }
}
