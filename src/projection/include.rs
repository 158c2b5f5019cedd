//! Include 집합
//!
//! 호출자가 실체화를 요청한 점(dot) 경로들의 집합입니다.
//! `author.posts`는 `author`를 강제하고, 중첩 엔티티 안에서 `posts`를 강제합니다.

use std::collections::{BTreeMap, BTreeSet};

/// 한 프로젝션 요청에 붙는 include 경로 집합
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IncludeSet {
    paths: BTreeSet<String>,
}

impl IncludeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// 쉼표로 구분된 include 지시문을 파싱합니다. (`author,author.posts`)
    ///
    /// 공백과 빈 세그먼트는 무시합니다.
    pub fn parse(directive: &str) -> Self {
        Self::from_paths(directive.split(','))
    }

    pub fn from_paths<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let paths = paths
            .into_iter()
            .filter_map(|p| normalize_path(p.as_ref()))
            .collect();
        Self { paths }
    }

    /// URL 쿼리 문자열에서 `include` 지시문을 추출합니다.
    ///
    /// `include=a,b`, 반복된 `include=a&include=b`, `include[]=a` 형태를 모두
    /// 지원합니다. 디코딩할 수 없는 값은 건너뜁니다.
    pub fn from_query(query: &str) -> Self {
        let mut set = Self::new();

        for pair in query.split('&') {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            let key = urlencoding::decode(key).map(|k| k.into_owned()).unwrap_or_default();
            if key != "include" && key != "include[]" {
                continue;
            }
            let value = value.replace('+', " ");
            if let Ok(decoded) = urlencoding::decode(&value) {
                set = set.union(&Self::parse(&decoded));
            }
        }

        set
    }

    /// 두 집합의 합집합을 새 값으로 반환합니다.
    pub fn union(&self, other: &IncludeSet) -> Self {
        Self {
            paths: self.paths.union(&other.paths).cloned().collect(),
        }
    }

    pub fn contains(&self, path: &str) -> bool {
        self.paths.contains(path)
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.paths.iter().map(String::as_str)
    }

    /// 해석 1회 동안 사용할 접두사 트리로 컴파일합니다.
    pub fn tree(&self) -> IncludeTree {
        let mut root = IncludeTree::default();
        for path in &self.paths {
            let mut node = &mut root;
            for segment in path.split('.') {
                node = node.children.entry(segment.to_string()).or_default();
            }
        }
        root
    }
}

impl From<&str> for IncludeSet {
    fn from(directive: &str) -> Self {
        Self::parse(directive)
    }
}

impl<const N: usize> From<[&str; N]> for IncludeSet {
    fn from(paths: [&str; N]) -> Self {
        Self::from_paths(paths)
    }
}

impl From<&IncludeSet> for IncludeSet {
    fn from(set: &IncludeSet) -> Self {
        set.clone()
    }
}

fn normalize_path(raw: &str) -> Option<String> {
    let segments: Vec<&str> = raw
        .split('.')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();

    if segments.is_empty() {
        None
    } else {
        Some(segments.join("."))
    }
}

/// include 집합의 접두사 트리
///
/// 필드마다 한 번만 방문하므로, `author`와 `author.posts`처럼 접두사를 공유하는
/// 경로가 여러 개여도 공유 부모는 정확히 한 번 강제됩니다.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IncludeTree {
    children: BTreeMap<String, IncludeTree>,
}

impl IncludeTree {
    /// 이 wire 이름 또는 그로 시작하는 더 긴 경로가 요청되었는지
    pub fn requests(&self, wire: &str) -> bool {
        self.children.contains_key(wire)
    }

    /// 중첩 엔티티에 전달할 접미사 트리
    pub fn nested(&self, wire: &str) -> IncludeTree {
        self.children.get(wire).cloned().unwrap_or_default()
    }

    pub(crate) fn child(&self, wire: &str) -> Option<&IncludeTree> {
        self.children.get(wire)
    }
}
