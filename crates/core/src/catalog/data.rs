//! Built-in reference tables for the Punjab network.

use super::{RouteRecord, StopRecord};

pub(super) const STOPS: &[StopRecord] = &[
    StopRecord::new("sangrur", "Sangrur", "ਸੰਗਰੂਰ", 48.0, 65.0),
    StopRecord::new("patrana", "Patrana", "ਪਾਤੜਾਂ", 68.0, 70.0),
    StopRecord::new("bhawanigarh", "Bhawanigarh", "ਭਵਾਨੀਗੜ੍ਹ", 60.0, 64.0),
    StopRecord::new("dhuri", "Dhuri", "ਧੂਰੀ", 55.0, 58.0),
    StopRecord::new("jakhal", "Jakhal", "ਜਾਖਲ", 45.0, 75.0),
    StopRecord::new("sunam", "Sunam", "ਸੁਨਾਮ", 42.0, 70.0),
    StopRecord::new("lehra", "Lehra", "ਲਹਿਰਾ", 40.0, 78.0),
    StopRecord::new("lehra_mohabbat", "Lehra Mohabbat", "ਲਹਿਰਾ ਮੁਹੱਬਤ", 38.0, 76.0),
    StopRecord::new("arakwas", "Arakwas", "ਅਰਕਵਾਸ", 45.0, 68.0),
    StopRecord::new("nabha", "Nabha", "ਨਾਭਾ", 65.0, 62.0),
    StopRecord::new("samana", "Samana", "ਸਮਾਣਾ", 72.0, 68.0),
    StopRecord::new("sherpur", "Sherpur", "ਸ਼ੇਰਪੁਰ", 58.0, 52.0),
    StopRecord::new("molowal", "Molowal", "ਮੋਲੋਵਾਲ", 60.0, 55.0),
    StopRecord::new("malerkotla", "Malerkotla", "ਮਲੇਰਕੋਟਲਾ", 59.0, 50.0),
    StopRecord::new("khanna", "Khanna", "ਖੰਨਾ", 62.0, 46.0),
    StopRecord::new("patiala", "Patiala", "ਪਟਿਆਲਾ", 75.0, 60.0),
    StopRecord::new("bathinda", "Bathinda", "ਬਠਿੰਡਾ", 32.0, 80.0),
    StopRecord::new("abohar", "Abohar", "ਅਬੋਹਰ", 18.0, 82.0),
    StopRecord::new("malout", "Malout", "ਮਲੋਟ", 22.0, 75.0),
    StopRecord::new("fazilka", "Fazilka", "ਫਾਜ਼ਿਲਕਾ", 12.0, 68.0),
    StopRecord::new("ludhiana", "Ludhiana", "ਲੁਧਿਆਣਾ", 55.0, 45.0),
    StopRecord::new("raikot", "Raikot", "ਰਾਏਕੋਟ", 48.0, 52.0),
    StopRecord::new("samrala", "Samrala", "ਸਮਰਾਲਾ", 65.0, 44.0),
    StopRecord::new("amritsar", "Amritsar", "ਅੰਮ੍ਰਿਤਸਰ", 30.0, 25.0),
    StopRecord::new("tarn_taran", "Tarn Taran", "ਤਰਨ ਤਾਰਨ", 28.0, 35.0),
    StopRecord::new("goindwal", "Goindwal", "ਗੋਇੰਦਵਾਲ", 35.0, 38.0),
    StopRecord::new("khadoor_sahib", "Khadoor Sahib", "ਖਡੂਰ ਸਾਹਿਬ", 32.0, 37.0),
    StopRecord::new("jalandhar", "Jalandhar", "ਜਲੰਧਰ", 45.0, 40.0),
    StopRecord::new("hoshiarpur", "Hoshiarpur", "ਹੁਸ਼ਿਆਰਪੁਰ", 60.0, 30.0),
    StopRecord::new("dasuya", "Dasuya", "ਦਸੂਹਾ", 55.0, 25.0),
    StopRecord::new("mukerian", "Mukerian", "ਮੁਕੇਰੀਆਂ", 52.0, 22.0),
    StopRecord::new("chandigarh", "Chandigarh", "ਚੰਡੀਗੜ੍ਹ", 82.0, 38.0),
    StopRecord::new("derabassi", "Derabassi", "ਡੇਰਾਬੱਸੀ", 70.0, 56.0),
    StopRecord::new("zirakpur", "Zirakpur", "ਜ਼ੀਰਕਪੁਰ", 78.0, 48.0),
    StopRecord::new("singhpura", "Singhpura", "ਸਿੰਘਪੁਰਾ", 74.0, 53.0),
    StopRecord::new("bhankharpur", "Bhankharpur", "ਭੰਖਰਪੁਰ", 72.0, 54.0),
    StopRecord::new("kharar", "Kharar", "ਖਰੜ", 77.0, 42.0),
    StopRecord::new("balongi", "Balongi", "ਬਲੌਂਗੀ", 79.0, 41.0),
    StopRecord::new("daun", "Daun", "ਦਾਊਂ", 78.0, 41.5),
    StopRecord::new("khizrabad", "Khizrabad", "ਖਿਜ਼ਰਾਬਾਦ", 75.0, 35.0),
    StopRecord::new("mullanpur", "Mullanpur", "ਮੁੱਲਾਂਪੁਰ", 78.0, 36.0),
    StopRecord::new("saketri", "Saketri", "ਸਕੇਤੜੀ", 85.0, 42.0),
    StopRecord::new("manimajra", "Manimajra", "ਮਨੀਮਾਜਰਾ", 84.0, 40.0),
    StopRecord::new("nada_sahib", "Nada Sahib", "ਨਾਡਾ ਸਾਹਿਬ", 88.0, 45.0),
];

pub(super) const ROUTES: &[RouteRecord] = &[
    RouteRecord {
        id: "route-sr-1",
        en: "Sangrur-Patrana",
        pa: "ਸੰਗਰੂਰ-ਪਾਤੜਾਂ",
        color: "#fca5a5",
        stops: &["sangrur", "bhawanigarh", "dhuri", "patrana"],
    },
    RouteRecord {
        id: "route-sr-2",
        en: "Sangrur-Jakhal",
        pa: "ਸੰਗਰੂਰ-ਜਾਖਲ",
        color: "#93c5fd",
        stops: &["sangrur", "sunam", "lehra", "jakhal"],
    },
    RouteRecord {
        id: "route-sr-3",
        en: "Sangrur-Lehra",
        pa: "ਸੰਗਰੂਰ-ਲਹਿਰਾ",
        color: "#86efac",
        stops: &["sangrur", "sunam", "lehra_mohabbat", "lehra"],
    },
    RouteRecord {
        id: "route-sr-4",
        en: "Sangrur-Sunam",
        pa: "ਸੰਗਰੂਰ-ਸੁਨਾਮ",
        color: "#fcd34d",
        stops: &["sangrur", "dhuri", "arakwas", "sunam"],
    },
    RouteRecord {
        id: "route-sr-5",
        en: "Sangrur-Nabha",
        pa: "ਸੰਗਰੂਰ-ਨਾਭਾ",
        color: "#d8b4fe",
        stops: &["sangrur", "samana", "nabha"],
    },
    RouteRecord {
        id: "route-sr-7",
        en: "Malerkotla-Patiala",
        pa: "ਮਲੇਰਕੋਟਲਾ-ਪਟਿਆਲਾ",
        color: "#a7f3d0",
        stops: &["malerkotla", "khanna", "nabha", "patiala"],
    },
    RouteRecord {
        id: "route-chd-2",
        en: "Chandigarh-Derabassi",
        pa: "ਚੰਡੀਗੜ੍ਹ-ਡੇਰਾਬੱਸੀ",
        color: "#bae6fd",
        stops: &["chandigarh", "zirakpur", "bhankharpur", "derabassi"],
    },
    RouteRecord {
        id: "route-chd-3",
        en: "Chandigarh-Kharar",
        pa: "ਚੰਡੀਗੜ੍ਹ-ਖਰੜ",
        color: "#fecaca",
        stops: &["chandigarh", "balongi", "daun", "kharar"],
    },
    RouteRecord {
        id: "route-pat-2",
        en: "Patiala-Bathinda",
        pa: "ਪਟਿਆਲਾ-ਬਠਿੰਡਾ",
        color: "#fed7aa",
        stops: &["patiala", "sangrur", "sunam", "bathinda"],
    },
    RouteRecord {
        id: "route-bat-2",
        en: "Bathinda-Abohar",
        pa: "ਬਠਿੰਡਾ-ਅਬੋਹਰ",
        color: "#bbf7d0",
        stops: &["bathinda", "malout", "fazilka", "abohar"],
    },
    RouteRecord {
        id: "route-lud-2",
        en: "Ludhiana-Raikot",
        pa: "ਲੁਧਿਆਣਾ-ਰਾਏਕੋਟ",
        color: "#e9d5ff",
        stops: &["ludhiana", "samrala", "khanna", "raikot"],
    },
    RouteRecord {
        id: "route-amr-2",
        en: "Amritsar-Tarn Taran",
        pa: "ਅੰਮ੍ਰਿਤਸਰ-ਤਰਨ ਤਾਰਨ",
        color: "#fde68a",
        stops: &["amritsar", "goindwal", "khadoor_sahib", "tarn_taran"],
    },
    RouteRecord {
        id: "route-jal-2",
        en: "Jalandhar-Hoshiarpur",
        pa: "ਜਲੰਧਰ-ਹੁਸ਼ਿਆਰਪੁਰ",
        color: "#a5f3fc",
        stops: &["jalandhar", "dasuya", "mukerian", "hoshiarpur"],
    },
];
