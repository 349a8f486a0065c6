// page.rs — 页面静态结构（导航链接、内容区块、globe 挂载位）

/// 导航链接：标题走 i18n，anchor 对应内容区块的锚点。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavLink {
    pub label_key: String,
    pub anchor: String,
}

/// 内容区块。body_key 为空字符串时只渲染标题。
#[derive(Debug, Clone)]
pub struct Section {
    pub anchor: String,
    pub title_key: String,
    pub body_key: String,
}

/// 页面描述：原网页的 DOM 结构在这里退化为一份静态清单。
/// `globe_slot` 对应原页面的 globe 容器元素，可以不存在。
#[derive(Debug, Clone)]
pub struct Page {
    pub nav_links: Vec<NavLink>,
    pub sections: Vec<Section>,
    pub globe_slot: bool,
}

impl Page {
    pub fn landing() -> Self {
        let anchors = ["home", "features", "about", "contact"];

        let nav_links = anchors
            .iter()
            .map(|a| NavLink {
                label_key: format!("nav.{}", a),
                anchor: (*a).to_string(),
            })
            .collect();

        let sections = anchors
            .iter()
            .map(|a| Section {
                anchor: (*a).to_string(),
                title_key: format!("section.{}.title", a),
                body_key: format!("section.{}.body", a),
            })
            .collect();

        Self {
            nav_links,
            sections,
            globe_slot: true,
        }
    }

    /// 没有 globe 容器的页面（用于没有这块内容的子页面）。
    pub fn without_globe(mut self) -> Self {
        self.globe_slot = false;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn landing_page_has_nav_and_globe_slot() {
        let page = Page::landing();
        assert_eq!(page.nav_links.len(), 4);
        assert_eq!(page.nav_links.len(), page.sections.len());
        assert!(page.globe_slot);
        for (link, section) in page.nav_links.iter().zip(page.sections.iter()) {
            assert_eq!(link.anchor, section.anchor);
        }
    }

    #[test]
    fn without_globe_clears_slot_only() {
        let page = Page::landing().without_globe();
        assert!(!page.globe_slot);
        assert_eq!(page.nav_links.len(), 4);
    }
}
