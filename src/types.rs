//! 通用类型定义
//!
//! 平面整数坐标点：图中顶点的唯一身份

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 二维整数坐标点
///
/// 顶点的身份完全由 `(x, y)` 决定，坐标相同的两个点可互换。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn x(&self) -> i32 {
        self.x
    }

    pub fn y(&self) -> i32 {
        self.y
    }

    /// 到另一点的欧氏距离
    pub fn distance_to(&self, other: &Point) -> f64 {
        // 先转 f64，避免 i32 差值平方溢出
        let dx = f64::from(self.x) - f64::from(other.x);
        let dy = f64::from(self.y) - f64::from(other.y);
        (dx * dx + dy * dy).sqrt()
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}

impl FromStr for Point {
    type Err = Error;

    /// 支持 `x,y`、`(x,y)` 以及 `x y` 三种写法
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let inner = trimmed
            .strip_prefix('(')
            .and_then(|rest| rest.strip_suffix(')'))
            .unwrap_or(trimmed);

        let parts: Vec<&str> = inner
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|part| !part.is_empty())
            .collect();
        if parts.len() != 2 {
            return Err(Error::ParseError(format!("无效的坐标: {}", s)));
        }

        let x = parts[0]
            .parse::<i32>()
            .map_err(|e| Error::ParseError(format!("无效的 x 坐标 {}: {}", parts[0], e)))?;
        let y = parts[1]
            .parse::<i32>()
            .map_err(|e| Error::ParseError(format!("无效的 y 坐标 {}: {}", parts[1], e)))?;

        Ok(Point::new(x, y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_distance() {
        let a = Point::new(0, 0);
        let b = Point::new(3, 4);

        assert_eq!(a.distance_to(&b), 5.0);
        assert_eq!(b.distance_to(&a), 5.0);
        assert_eq!(a.distance_to(&a), 0.0);
    }

    #[test]
    fn test_point_distance_extreme_coordinates() {
        let a = Point::new(i32::MIN, 0);
        let b = Point::new(i32::MAX, 0);

        assert_eq!(a.distance_to(&b), u32::MAX as f64);
    }

    #[test]
    fn test_point_parsing() {
        assert_eq!("3,4".parse::<Point>().unwrap(), Point::new(3, 4));
        assert_eq!("(-3, 4)".parse::<Point>().unwrap(), Point::new(-3, 4));
        assert_eq!(" 10 20 ".parse::<Point>().unwrap(), Point::new(10, 20));

        assert!("3".parse::<Point>().is_err());
        assert!("a,b".parse::<Point>().is_err());
        assert!("1,2,3".parse::<Point>().is_err());
    }

    #[test]
    fn test_point_display() {
        assert_eq!(Point::new(5, -6).to_string(), "(5,-6)");
    }
}
