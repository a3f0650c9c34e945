use std::fmt;
use std::str::FromStr;

use crate::error::AppError;

/// Platform routing value, used by League-v4.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Platform {
    BR1,
    LA1,
    LA2,
    NA1,
    JP1,
    KR,
    EUN1,
    #[default]
    EUW1,
    ME1,
    RU,
    TR1,
    OC1,
    PH2,
    SG2,
    TH2,
    TW2,
    VN2,
}

/// `(platform, host prefix, regional cluster, accepted short aliases)`
static PLATFORMS: [(Platform, &str, Region, &[&str]); 17] = [
    (Platform::BR1, "br1", Region::Americas, &["BR"]),
    (Platform::LA1, "la1", Region::Americas, &["LAN"]),
    (Platform::LA2, "la2", Region::Americas, &["LAS"]),
    (Platform::NA1, "na1", Region::Americas, &["NA"]),
    (Platform::JP1, "jp1", Region::Asia, &["JP"]),
    (Platform::KR, "kr", Region::Asia, &[]),
    (Platform::EUN1, "eun1", Region::Europe, &["EUNE", "EUN"]),
    (Platform::EUW1, "euw1", Region::Europe, &["EUW"]),
    (Platform::ME1, "me1", Region::Europe, &["ME"]),
    (Platform::RU, "ru", Region::Europe, &[]),
    (Platform::TR1, "tr1", Region::Europe, &["TR"]),
    (Platform::OC1, "oc1", Region::Sea, &["OCE", "OC"]),
    (Platform::PH2, "ph2", Region::Sea, &["PH"]),
    (Platform::SG2, "sg2", Region::Sea, &["SG"]),
    (Platform::TH2, "th2", Region::Sea, &["TH"]),
    (Platform::TW2, "tw2", Region::Sea, &["TW"]),
    (Platform::VN2, "vn2", Region::Sea, &["VN"]),
];

impl Platform {
    fn entry(self) -> &'static (Platform, &'static str, Region, &'static [&'static str]) {
        PLATFORMS
            .iter()
            .find(|(platform, ..)| *platform == self)
            .unwrap_or(&PLATFORMS[7])
    }

    pub fn base_url(&self) -> String {
        format!("https://{}.api.riotgames.com", self.as_str())
    }

    pub fn as_str(&self) -> &'static str {
        self.entry().1
    }

    /// Regional cluster serving Account-v1 and Match-v5 for this platform.
    pub fn to_region(self) -> Region {
        self.entry().2
    }
}

impl FromStr for Platform {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_uppercase();
        PLATFORMS
            .iter()
            .find(|(_, host, _, aliases)| {
                host.eq_ignore_ascii_case(&upper) || aliases.contains(&upper.as_str())
            })
            .map(|(platform, ..)| *platform)
            .ok_or_else(|| AppError::InvalidRegion(s.to_string()))
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str().to_uppercase())
    }
}

/// Regional routing value, used by Account-v1 and Match-v5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    Americas,
    Asia,
    Europe,
    Sea,
}

impl Region {
    pub fn base_url(&self) -> String {
        format!("https://{}.api.riotgames.com", self.as_str())
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Americas => "americas",
            Self::Asia => "asia",
            Self::Europe => "europe",
            Self::Sea => "sea",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A `gameName#tagLine` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RiotId {
    pub game_name: String,
    pub tag_line: String,
}

impl FromStr for RiotId {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('#') {
            Some((game_name, tag_line)) if !game_name.is_empty() && !tag_line.is_empty() => {
                Ok(Self {
                    game_name: game_name.to_string(),
                    tag_line: tag_line.to_string(),
                })
            }
            _ => Err(AppError::InvalidRiotId(s.to_string())),
        }
    }
}

impl fmt::Display for RiotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.game_name, self.tag_line)
    }
}
